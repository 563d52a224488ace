//! Model extraction: plain data classes from the `models` subdirectory.

use crate::error::ErrorKind;
use crate::model::Model;
use crate::pairing::{self, ExamplePolicy};
use crate::syntax::Module;
use crate::text;

/// Extract the data class a `models/` file documents.
pub fn extract(module: &Module) -> Result<Model, ErrorKind> {
    let class = super::documented_class(module)?;

    let mut model = Model {
        name: class.name.clone(),
        definition: class.definition.clone(),
        ..Default::default()
    };
    if let Some(doc) = &class.docstring {
        model.short_description = Some(text::first_line(doc));
        model.long_description = Some(doc.clone());
    }
    model.attributes = pairing::pair_attributes(&class.body, ExamplePolicy::Optional)?;

    Ok(model)
}
