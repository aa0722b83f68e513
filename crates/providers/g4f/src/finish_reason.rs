use crate::ai_sdk_types::v1::FinishReason;

/// Total mapping from backend finish codes; absent or unknown codes map to `Unknown`.
pub fn map_g4f_finish_reason(reason: Option<&str>) -> FinishReason {
    match reason.unwrap_or("") {
        "stop" => FinishReason::Stop,
        "length" | "model_length" => FinishReason::Length,
        "content_filter" => FinishReason::ContentFilter,
        "tool_calls" => FinishReason::ToolCalls,
        _ => FinishReason::Unknown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_codes() {
        assert_eq!(map_g4f_finish_reason(Some("stop")), FinishReason::Stop);
        assert_eq!(map_g4f_finish_reason(Some("length")), FinishReason::Length);
        assert_eq!(map_g4f_finish_reason(Some("model_length")), FinishReason::Length);
        assert_eq!(map_g4f_finish_reason(Some("tool_calls")), FinishReason::ToolCalls);
        assert_eq!(
            map_g4f_finish_reason(Some("content_filter")),
            FinishReason::ContentFilter
        );
    }

    #[test]
    fn everything_else_is_unknown() {
        for code in [None, Some(""), Some("STOP"), Some("eos"), Some("error"), Some("function_call")] {
            assert_eq!(map_g4f_finish_reason(code), FinishReason::Unknown, "{code:?}");
        }
    }
}
