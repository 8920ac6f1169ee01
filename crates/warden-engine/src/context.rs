//! Renders the `<intent_context>` block returned by a successful handshake.

use warden_core::Intent;

/// Build the XML context block the agent receives after binding an intent.
pub fn render_intent_context(intent: &Intent) -> String {
    let mut sb = String::new();
    sb.push_str("<intent_context>\n");
    sb.push_str(&format!("  <id>{}</id>\n", escape_xml(&intent.id)));
    sb.push_str(&format!("  <name>{}</name>\n", escape_xml(&intent.name)));
    sb.push_str(&format!("  <status>{}</status>\n", intent.status.as_str()));

    sb.push_str("  <owned_scope>\n");
    for pattern in &intent.owned_scope {
        sb.push_str(&format!("    <pattern>{}</pattern>\n", escape_xml(pattern)));
    }
    sb.push_str("  </owned_scope>\n");

    sb.push_str("  <constraints>\n");
    for item in &intent.constraints {
        sb.push_str(&format!("    <item>{}</item>\n", escape_xml(item)));
    }
    sb.push_str("  </constraints>\n");

    sb.push_str("  <acceptance_criteria>\n");
    for item in &intent.acceptance_criteria {
        sb.push_str(&format!("    <item>{}</item>\n", escape_xml(item)));
    }
    sb.push_str("  </acceptance_criteria>\n");

    sb.push_str("</intent_context>");
    sb
}

fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
