//! `dtb formats`: list available output formats.

use anyhow::Result;

use dtb_core::text::sentence;
use dtb_encode::EncoderRegistry;

/// Print every registered format.
pub fn run(json: bool) -> Result<()> {
    print!("{}", render(&EncoderRegistry::with_defaults(), json)?);
    Ok(())
}

/// Format listing as a text table or JSON array.
pub fn render(registry: &EncoderRegistry, json: bool) -> Result<String> {
    let formats = registry.formats();
    if json {
        let mut out = serde_json::to_string_pretty(&formats)?;
        out.push('\n');
        return Ok(out);
    }

    let mut out = format!(
        "{:<10} {:<18} {:<10} {:<6} {:<24} {}\n",
        "NAME", "FORMAT", "EXTENSION", "TYPE", "CATEGORY", "MIME TYPES"
    );
    for info in formats {
        out.push_str(&format!(
            "{:<10} {:<18} {:<10} {:<6} {:<24} {}\n",
            info.name,
            info.friendly_name,
            info.extension,
            if info.binary { "binary" } else { "text" },
            info.category,
            sentence(info.mime_types, ", ", None),
        ));
    }
    Ok(out)
}
