use std::sync::OnceLock;

static QUIET: OnceLock<bool> = OnceLock::new();

/// Suppress decorative output (`TPLRESOURCE_QUIET=1`); template source is still printed
pub fn is_quiet() -> bool {
    *QUIET.get_or_init(|| {
        std::env::var("TPLRESOURCE_QUIET")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false)
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Human,
    Json,
}

impl OutputMode {
    pub fn from_json_flag(json: bool) -> Self {
        if json { Self::Json } else { Self::Human }
    }

    pub fn is_human(&self) -> bool {
        matches!(self, Self::Human)
    }
}

/// Print one JSON document per line
pub fn emit_json(value: &serde_json::Value) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string(value)?);
    Ok(())
}
