use serde_json::{json, Value as JsonValue};

use crate::ai_sdk_types::v1;

pub struct PreparedTools {
    pub tools: Option<Vec<JsonValue>>,
    pub tool_choice: Option<JsonValue>,
    pub warnings: Vec<v1::CallWarning>,
}

pub(crate) fn function_tool_json(tool: &v1::FunctionTool) -> JsonValue {
    let mut function = json!({ "name": tool.name, "parameters": tool.parameters });
    if let (Some(desc), Some(map)) = (&tool.description, function.as_object_mut()) {
        map.insert("description".into(), json!(desc));
    }
    json!({ "type": "function", "function": function })
}

/// Tool declarations for `regular` mode.
///
/// The backend has no "required" or per-tool choice, so both become `"any"`
/// and a specific tool choice narrows the declared tools to that one.
pub fn prepare_tools(tools: &[v1::Tool], tool_choice: Option<&v1::ToolChoice>) -> PreparedTools {
    let mut warnings: Vec<v1::CallWarning> = vec![];
    let function_tools: Vec<&v1::FunctionTool> = tools
        .iter()
        .filter_map(|tool| match tool {
            v1::Tool::Function(f) => Some(f),
            v1::Tool::ProviderDefined(p) => {
                warnings.push(v1::CallWarning::UnsupportedTool {
                    tool_name: p.name.clone(),
                    details: Some("provider-defined tools are not supported".into()),
                });
                None
            }
        })
        .collect();

    if function_tools.is_empty() {
        return PreparedTools {
            tools: None,
            tool_choice: None,
            warnings,
        };
    }

    let declared = |filter: Option<&str>| -> Vec<JsonValue> {
        function_tools
            .iter()
            .filter(|t| filter.map_or(true, |name| t.name == name))
            .map(|t| function_tool_json(t))
            .collect()
    };

    let (tools, tool_choice) = match tool_choice {
        None => (declared(None), None),
        Some(v1::ToolChoice::Auto) => (declared(None), Some(json!("auto"))),
        Some(v1::ToolChoice::None) => (declared(None), Some(json!("none"))),
        Some(v1::ToolChoice::Required) => (declared(None), Some(json!("any"))),
        Some(v1::ToolChoice::Tool { tool_name }) => {
            (declared(Some(tool_name.as_str())), Some(json!("any")))
        }
    };

    PreparedTools {
        tools: Some(tools),
        tool_choice,
        warnings,
    }
}
