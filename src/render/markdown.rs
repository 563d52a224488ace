//! MDX site renderer.
//!
//! Emits one Docusaurus-flavoured page tree per project: a folder per main
//! class (index page plus one page per method), a `models` folder and an
//! `exceptions` folder with one page per entity and an optional module
//! index page. Every page starts with a metadata header consumed by the
//! site's sidebar.

use crate::model::{Attribute, ExceptionModel, MainClass, Method, Model, ModuleDoc, Project};
use crate::render::{RenderedFile, Renderer};
use crate::text;
use anyhow::Result;
use std::path::PathBuf;

/// Link bases used by the generated cross-references.
const MODELS_LINK_BASE: &str = "/docs/python-sdk/models";
const EXCEPTIONS_LINK_BASE: &str = "/docs/python-sdk/exceptions";

/// Sidebar slots: main class indexes sit at 3, the two conventional
/// module pages behind them.
const SIDEBAR_MAIN: u32 = 3;
const SIDEBAR_MODELS: u32 = 4;
const SIDEBAR_EXCEPTIONS: u32 = 5;

pub struct MarkdownRenderer;

impl Renderer for MarkdownRenderer {
    fn render(&self, project: &Project) -> Result<Vec<RenderedFile>> {
        let mut files = Vec::new();

        for main_class in &project.main_classes {
            let folder = text::folder_name(&main_class.name);
            files.push(RenderedFile {
                path: PathBuf::from(&folder).join(format!("{}.md", folder)),
                contents: render_main_index(main_class, &folder),
            });
            for method in &main_class.methods {
                files.push(RenderedFile {
                    path: PathBuf::from(&folder)
                        .join(format!("{}.mdx", method.name.replace('_', "-"))),
                    contents: render_method(method, &main_class.name),
                });
            }
        }

        if let Some(doc) = project.module_docs.get("models") {
            files.push(RenderedFile {
                path: PathBuf::from("models").join("models.md"),
                contents: render_module_index("Models", doc, SIDEBAR_MODELS),
            });
        }
        for model in &project.models {
            files.push(RenderedFile {
                path: PathBuf::from("models").join(format!("{}.mdx", model.name)),
                contents: render_model(model),
            });
        }

        if let Some(doc) = project.module_docs.get("exceptions") {
            files.push(RenderedFile {
                path: PathBuf::from("exceptions").join("exceptions.md"),
                contents: render_module_index("Exceptions", doc, SIDEBAR_EXCEPTIONS),
            });
        }
        for exception in &project.exceptions {
            files.push(RenderedFile {
                path: PathBuf::from("exceptions").join(format!("{}.mdx", exception.name)),
                contents: render_exception(exception),
            });
        }

        Ok(files)
    }
}

// -- Page builders ------------------------------------------------------------

/// Metadata header at the top of every page.
fn metadata(title: &str, description: Option<&str>, sidebar: Option<(u32, Option<&str>)>) -> String {
    let mut out = String::from("---\n");
    out.push_str(&format!("title: {}\n", title));
    if let Some(description) = description {
        out.push_str(&format!("description: {}\n", single_line(description)));
    }
    if let Some((position, class_name)) = sidebar {
        out.push_str(&format!("sidebar_position: {}\n", position));
        if let Some(class_name) = class_name {
            out.push_str(&format!("sidebar_class_name: {}\n", class_name));
        }
    }
    out.push_str("---\n");
    out
}

fn render_main_index(main_class: &MainClass, folder: &str) -> String {
    let sidebar_class = format!("sidebar-{}", folder);
    let mut out = metadata(
        &main_class.name,
        main_class.short_description.as_deref(),
        Some((SIDEBAR_MAIN, Some(&sidebar_class))),
    );
    out.push('\n');
    if let Some(long) = &main_class.long_description {
        out.push_str(long);
        out.push('\n');
    }
    out
}

fn render_module_index(title: &str, doc: &ModuleDoc, position: u32) -> String {
    let mut out = metadata(
        title,
        doc.short_description.as_deref(),
        Some((position, None)),
    );
    out.push('\n');
    if let Some(long) = &doc.long_description {
        out.push_str(long);
        out.push('\n');
    }
    out
}

/// One method page: definition, description, parameters, return value,
/// usage example, example response, exceptions, detailed parameters.
fn render_method(method: &Method, class_name: &str) -> String {
    let mut lines: Vec<String> = Vec::new();

    lines.push(metadata(
        &method.name,
        method.short_description.as_deref(),
        None,
    ));
    lines.push("import CodeBlock from '@theme/CodeBlock';\n".to_string());
    lines.push("```py".to_string());
    lines.push(method.definition.clone());
    lines.push("```\n".to_string());

    if let Some(long) = &method.long_description {
        lines.push(long.clone());
        lines.push(String::new());
    }

    if !method.parameters.is_empty() {
        lines.push("## Parameters\n".to_string());
        for param in &method.parameters {
            lines.push(format!(
                " - [{}](#{}): {}",
                param.name, param.name, param.description
            ));
        }
        lines.push(String::new());
    }

    if let Some(return_type) = &method.return_type {
        lines.push("## Returns\n".to_string());
        lines.push("<CodeBlock language=\"python\">".to_string());
        lines.push(format!("    {}", render_return_link(return_type)));
        lines.push("</CodeBlock>\n".to_string());
        if let Some(description) = &method.return_description {
            lines.push(description.trim().to_string());
            lines.push(String::new());
        }
    }

    lines.push("## Example\n".to_string());
    lines.push("### Usage\n".to_string());
    lines.push(render_usage(method, class_name));
    if let Some(example) = &method.example_response {
        lines.push("### Example response\n".to_string());
        lines.push(example.trim().to_string());
        lines.push(String::new());
    }

    if !method.raises.is_empty() {
        lines.push("## Exceptions\n".to_string());
        for raise in &method.raises {
            lines.push(format!(
                "- [{}]({}/{}): {}",
                raise.exception, EXCEPTIONS_LINK_BASE, raise.exception, raise.description
            ));
        }
        lines.push(String::new());
    }

    if !method.parameters.is_empty() {
        lines.push("## Parameters detailed".to_string());
        for param in &method.parameters {
            lines.push(format!("### {}\n", param.name));
            lines.push(param.description.clone());
            if let Some(param_type) = &param.param_type {
                lines.push(format!("- type: `{}`", param_type));
            }
            if let Some(example) = &param.example {
                lines.push(format!("- example: `{}`", example));
            }
            lines.push(String::new());
        }
    }

    let mut out = lines.join("\n");
    while out.ends_with("\n\n") {
        out.pop();
    }
    out
}

/// The return type as a linked code block body. `List[X]` links its
/// element type, anything else links directly.
fn render_return_link(return_type: &str) -> String {
    if let Some(element) = return_type
        .strip_prefix("List[")
        .and_then(|rest| rest.strip_suffix(']'))
    {
        format!(
            "List[<a href=\"{}/{}\">{}</a>]",
            MODELS_LINK_BASE, element, element
        )
    } else {
        format!(
            "<a href=\"{}/{}\">{}</a>",
            MODELS_LINK_BASE, return_type, return_type
        )
    }
}

/// Ready-to-paste async usage snippet for one method.
fn render_usage(method: &Method, class_name: &str) -> String {
    let instance = text::folder_name(class_name).replace('-', "_");
    let mut out = String::from("```py\n");
    out.push_str("import asyncio\n\n");
    out.push_str(&format!("from {} import {}\n\n", class_name, class_name));
    out.push_str(&format!("async def print_{}():\n", method.name));
    out.push_str(&format!("    # Create the {} instance\n", class_name));
    out.push_str("    # You can additionally add an API key if you want\n");
    out.push_str(&format!("    {} = {}()\n", instance, class_name));
    if let Some(short) = &method.short_description {
        out.push_str(&format!("    # {}\n", short));
    }
    out.push_str(&format!(
        "    {} = await {}.{}(",
        method.name, instance, method.name
    ));
    if method.parameters.is_empty() {
        out.push_str(")\n");
    } else {
        out.push('\n');
        for (i, param) in method.parameters.iter().enumerate() {
            let value = match &param.example {
                Some(example) if param.param_type.as_deref() == Some("str") => {
                    format!("\"{}\"", example)
                }
                Some(example) => example.clone(),
                None => "...".to_string(),
            };
            let comma = if i + 1 < method.parameters.len() { "," } else { "" };
            out.push_str(&format!("        {}={}{}\n", param.name, value, comma));
        }
        out.push_str("    )\n");
    }
    out.push_str(&format!("    print({})\n", method.name));
    out.push_str("    # We need to close our instance once we are done\n");
    out.push_str(&format!("    await {}.close()\n\n", instance));
    out.push_str(&format!("asyncio.run(print_{}())\n", method.name));
    out.push_str("```\n");
    out
}

fn render_model(model: &Model) -> String {
    let mut lines: Vec<String> = Vec::new();
    lines.push(metadata(
        &model.name,
        model.short_description.as_deref(),
        None,
    ));
    lines.push("```py".to_string());
    lines.push(model.definition.clone());
    lines.push("```\n".to_string());
    if let Some(long) = &model.long_description {
        lines.push(long.clone());
        lines.push(String::new());
    }
    render_attributes(&mut lines, &model.attributes);
    lines.join("\n")
}

fn render_exception(exception: &ExceptionModel) -> String {
    let mut lines: Vec<String> = Vec::new();
    lines.push(metadata(
        &exception.name,
        exception.short_description.as_deref(),
        None,
    ));
    lines.push("```py".to_string());
    lines.push(exception.definition.clone());
    lines.push("```\n".to_string());
    if exception.is_abstract {
        lines.push(
            "_Abstract base exception — catch it to handle every error the API raises._"
                .to_string(),
        );
        lines.push(String::new());
    }
    if let Some(long) = &exception.long_description {
        lines.push(long.clone());
        lines.push(String::new());
    }
    render_attributes(&mut lines, &exception.attributes);
    lines.join("\n")
}

fn render_attributes(lines: &mut Vec<String>, attributes: &[Attribute]) {
    if attributes.is_empty() {
        return;
    }
    lines.push("## Attributes\n".to_string());
    for attribute in attributes {
        lines.push(format!("### {}\n", attribute.name));
        lines.push(attribute.description.clone());
        lines.push(format!("- type: `{}`", attribute.attribute_type));
        if let Some(example) = &attribute.example {
            lines.push(format!("- example: `{}`", example));
        }
        lines.push(String::new());
    }
}

/// Metadata descriptions have to stay on one header line.
fn single_line(text: &str) -> String {
    text.replace('\n', " ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Parameter, RaiseDoc};

    fn sample_method() -> Method {
        Method {
            name: "amount_out".into(),
            definition: "async def amount_out(self, blockchain: str, amount: int) -> List[AmountOut]:".into(),
            short_description: Some("Get the amount of token you will get".into()),
            long_description: Some("Get the amount of token you will get".into()),
            parameters: vec![
                Parameter {
                    name: "blockchain".into(),
                    description: "The chain id".into(),
                    param_type: Some("str".into()),
                    example: Some("ethereum".into()),
                },
                Parameter {
                    name: "amount".into(),
                    description: "The raw amount".into(),
                    param_type: Some("int".into()),
                    example: Some("1000".into()),
                },
            ],
            return_type: Some("List[AmountOut]".into()),
            return_description: Some("The amounts".into()),
            example_response: Some("```json\n[]\n```".into()),
            raises: vec![RaiseDoc {
                exception: "BlockchainNotSupportedException".into(),
                description: "Bad chain id".into(),
            }],
        }
    }

    #[test]
    fn method_page_sections() {
        let page = render_method(&sample_method(), "BlockchainAPIs");
        assert!(page.starts_with("---\ntitle: amount_out\n"));
        assert!(page.contains("import CodeBlock from '@theme/CodeBlock';"));
        assert!(page.contains("## Parameters\n"));
        assert!(page.contains(" - [blockchain](#blockchain): The chain id"));
        assert!(page.contains("## Returns"));
        assert!(page.contains("List[<a href=\"/docs/python-sdk/models/AmountOut\">AmountOut</a>]"));
        assert!(page.contains("### Example response"));
        assert!(page.contains(
            "- [BlockchainNotSupportedException](/docs/python-sdk/exceptions/BlockchainNotSupportedException): Bad chain id"
        ));
        assert!(page.contains("## Parameters detailed"));
    }

    #[test]
    fn usage_quotes_string_examples_only() {
        let usage = render_usage(&sample_method(), "BlockchainAPIs");
        assert!(usage.contains("blockchain_apis = BlockchainAPIs()"));
        assert!(usage.contains("blockchain=\"ethereum\","));
        assert!(usage.contains("amount=1000\n"));
        assert!(usage.contains("await blockchain_apis.close()"));
    }

    #[test]
    fn bare_method_page_has_no_optional_sections() {
        let method = Method {
            name: "close".into(),
            definition: "async def close(self) -> None:".into(),
            ..Default::default()
        };
        let page = render_method(&method, "BlockchainAPIs");
        assert!(!page.contains("## Parameters"));
        assert!(!page.contains("## Returns"));
        assert!(!page.contains("## Exceptions"));
        assert!(page.contains("### Usage"));
    }

    #[test]
    fn return_link_plain_type() {
        assert_eq!(
            render_return_link("Exchanges"),
            "<a href=\"/docs/python-sdk/models/Exchanges\">Exchanges</a>"
        );
    }

    #[test]
    fn model_page_attributes() {
        let model = Model {
            name: "AmountIn".into(),
            definition: "class AmountIn:".into(),
            short_description: Some("Amount to sell".into()),
            long_description: Some("Amount to sell".into()),
            attributes: vec![Attribute {
                name: "blockchain".into(),
                description: "The chain".into(),
                attribute_type: "str".into(),
                example: Some("ethereum".into()),
            }],
        };
        let page = render_model(&model);
        assert!(page.contains("### blockchain"));
        assert!(page.contains("- type: `str`"));
        assert!(page.contains("- example: `ethereum`"));
    }

    #[test]
    fn abstract_exception_noted() {
        let exception = ExceptionModel {
            name: "ApiException".into(),
            definition: "class ApiException(ABC):".into(),
            is_abstract: true,
            ..Default::default()
        };
        let page = render_exception(&exception);
        assert!(page.contains("_Abstract base exception"));
    }

    #[test]
    fn site_layout_paths() {
        let mut project = Project::default();
        project.main_classes.push(MainClass {
            name: "BlockchainAPIs".into(),
            methods: vec![sample_method()],
            ..Default::default()
        });
        project.models.push(Model {
            name: "AmountOut".into(),
            definition: "class AmountOut:".into(),
            ..Default::default()
        });
        project
            .module_docs
            .insert("models".into(), ModuleDoc::default());

        let files = MarkdownRenderer.render(&project).unwrap();
        let paths: Vec<String> = files
            .iter()
            .map(|f| f.path.to_string_lossy().replace('\\', "/"))
            .collect();
        assert!(paths.contains(&"blockchain-apis/blockchain-apis.md".to_string()));
        assert!(paths.contains(&"blockchain-apis/amount-out.mdx".to_string()));
        assert!(paths.contains(&"models/models.md".to_string()));
        assert!(paths.contains(&"models/AmountOut.mdx".to_string()));
    }

    #[test]
    fn module_index_pins_sidebar_position() {
        let doc = ModuleDoc {
            short_description: Some("The models".into()),
            long_description: Some("The models of the API.".into()),
        };
        let page = render_module_index("Models", &doc, SIDEBAR_MODELS);
        assert!(page.contains("sidebar_position: 4"));
        assert!(page.contains("description: The models"));
    }
}
