//! The `styles` command: list the lexer's styles.

use probes_lexer::{Style, PROBES};

pub fn list_styles() {
    println!("{} ({})", PROBES.display_name, PROBES.name);
    for (id, name) in PROBES.style_names() {
        let attributes = Style::try_from(id)
            .map(|style| PROBES.default_attributes(style).to_string())
            .unwrap_or_default();
        println!("  {id:>2}  {name:<22}  {attributes}");
    }
}
