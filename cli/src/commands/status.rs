use anchorgate_core::api as core_api;
use anyhow::Context;

use super::cli::StatusArgs;

pub fn handle_status(
    args: &StatusArgs,
    gate: &core_api::GateEnforcer,
    store: &dyn core_api::StateStore,
) -> anyhow::Result<String> {
    let status = gate.inspect(store);
    if args.json {
        let mut text = serde_json::to_string_pretty(&status).context("serialize gate status")?;
        text.push('\n');
        Ok(text)
    } else {
        Ok(status.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_output_includes_next_block() {
        let gate = core_api::GateEnforcer::default();
        let store = core_api::InMemoryStateStore::new();
        let text = handle_status(&StatusArgs { json: true }, &gate, &store).unwrap();
        let v: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(v["session_started"], false);
        assert_eq!(v["next_block"]["missing"], "Session not started");
    }

    #[test]
    fn text_output_says_allowed_when_ready() {
        let gate = core_api::GateEnforcer::default();
        let store = core_api::InMemoryStateStore::new().with_session(core_api::SessionState {
            session_started: true,
            ..Default::default()
        });
        let text = handle_status(&StatusArgs { json: false }, &gate, &store).unwrap();
        assert!(text.contains("next action:     allowed"));
    }
}
