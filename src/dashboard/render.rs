use super::payload::DashboardPayload;

const TEMPLATE: &str = include_str!("../../templates/dashboard.html");
const PAYLOAD_PLACEHOLDER: &str = "{{PAYLOAD_JSON}}";

/// Embeds the payload into the dashboard page.
pub fn render_dashboard(payload: &DashboardPayload) -> Result<String, serde_json::Error> {
    let json = serde_json::to_string(payload)?;

    Ok(render_with(TEMPLATE, &json))
}

// The payload lives in a <script> tag, so it must never close one
fn render_with(template: &str, payload_json: &str) -> String {
    template.replace(
        PAYLOAD_PLACEHOLDER,
        &payload_json.replace("</script>", "<\\/script>"),
    )
}
