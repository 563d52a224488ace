//! JSON renderer — dumps the whole Project IR for tooling integration.

use crate::model::Project;
use crate::render::{RenderedFile, Renderer};
use anyhow::Result;

pub struct JsonRenderer;

impl Renderer for JsonRenderer {
    fn render(&self, project: &Project) -> Result<Vec<RenderedFile>> {
        let mut contents = serde_json::to_string_pretty(project)?;
        contents.push('\n');
        Ok(vec![RenderedFile {
            path: "project.json".into(),
            contents,
        }])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{MainClass, Project};

    #[test]
    fn single_file_with_expected_keys() {
        let project = Project {
            main_classes: vec![MainClass {
                name: "Sample".into(),
                ..Default::default()
            }],
            ..Default::default()
        };
        let files = JsonRenderer.render(&project).unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].path.to_str(), Some("project.json"));
        assert!(files[0].contents.contains("\"main_classes\""));
        assert!(files[0].contents.contains("\"Sample\""));
        assert!(files[0].contents.contains("\"module_docs\""));
    }
}
