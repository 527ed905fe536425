use std::time::{SystemTime, UNIX_EPOCH};

use crossterm::style::{Color, Stylize, style};
use neuronek_core::{
    DoseLog, ElapsedFormat, Frame, Layer, Rendering, Rgb, SubstanceTable, render,
};

pub struct RenderCommandConfig<'a> {
    pub width: usize,
    pub height: usize,
    pub window_hours: Option<f64>,
    pub substances_path: Option<&'a str>,
    pub config_path: Option<&'a str>,
    pub doses: &'a [String],
    pub composite_elapsed: bool,
    pub color: bool,
}

pub fn run(cfg: RenderCommandConfig<'_>) {
    let table = super::load_substances(cfg.substances_path);
    let mut config = super::load_config(cfg.config_path, cfg.window_hours);
    if cfg.composite_elapsed {
        config.elapsed_format = ElapsedFormat::Composite;
    }

    let mut parsed = Vec::with_capacity(cfg.doses.len());
    for spec in cfg.doses {
        match super::parse_dose_spec(spec, &table) {
            Ok(dose) => parsed.push(dose),
            Err(e) => {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        }
    }
    // oldest first, so the log stays chronological
    parsed.sort_by(|a, b| b.2.cmp(&a.2));

    let now = SystemTime::now();
    let mut log = DoseLog::new();
    for (id, amount, ago) in parsed {
        let at = now.checked_sub(ago).unwrap_or(UNIX_EPOCH);
        if let Err(e) = log.record(&table, id, amount, at) {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }

    let rendering = render(&table, log.events(), cfg.width, cfg.height, now, &config);
    if cfg.color {
        println!("{}", colored_text(&rendering, &table));
    } else {
        println!("{}", rendering.to_text());
    }
}

fn ansi(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

/// Same layout as [`Rendering::to_text`], with curves and legend in substance colours.
fn colored_text(rendering: &Rendering, table: &SubstanceTable) -> String {
    let mut out = String::new();
    match &rendering.frame {
        Frame::Chart(canvas) => {
            for (i, row) in canvas.rows().enumerate() {
                if i > 0 {
                    out.push('\n');
                }
                for cell in row {
                    let glyph = cell.glyph.to_string();
                    let styled = match (cell.layer, cell.owner.and_then(|id| table.get(id))) {
                        (Layer::Curve(_), Some(s)) => style(&glyph).with(ansi(s.color())).bold().to_string(),
                        (Layer::Axis | Layer::Gridline, _) => style(&glyph).with(Color::DarkGrey).to_string(),
                        _ => glyph,
                    };
                    out.push_str(&styled);
                }
            }
        }
        Frame::TooSmall { .. } | Frame::Misconfigured { .. } => {
            let text = rendering.to_text();
            out.push_str(text.lines().next().unwrap_or_default());
        }
    }

    out.push_str("\n\n");
    let legend = &rendering.legend;
    let entries: Vec<String> = legend
        .entries
        .iter()
        .map(|e| style(format!("{} {}", e.marker, e.name))
                .with(ansi(e.color))
                .to_string())
        .collect();
    out.push_str(&entries.join("  "));
    if !legend.recent.is_empty() {
        if !entries.is_empty() {
            out.push_str("    ");
        }
        out.push_str("Recent: ");
        let recent: Vec<String> = legend
            .recent
            .iter()
            .map(|r| style(&r.label).with(ansi(r.color)).to_string())
            .collect();
        out.push_str(&recent.join(" · "));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use neuronek_core::RenderConfig;
    use std::time::Duration;

    fn strip_ansi(s: &str) -> String {
        let mut out = String::new();
        let mut chars = s.chars();
        while let Some(c) = chars.next() {
            if c == '\x1b' {
                for c in chars.by_ref() {
                    if c == 'm' {
                        break;
                    }
                }
            } else {
                out.push(c);
            }
        }
        out
    }

    #[test]
    fn test_colored_text_matches_plain_layout() {
        let table = SubstanceTable::builtin();
        let now = UNIX_EPOCH + Duration::from_secs(1_700_000_000);
        let mut log = DoseLog::new();
        let id = table.find_by_symbol('M').unwrap();
        log.record(&table, id, 180.0, now - Duration::from_secs(4 * 3600))
            .unwrap();
        let rendering = render(&table, log.events(), 50, 14, now, &RenderConfig::default());

        let colored = colored_text(&rendering, &table);
        assert!(colored.contains('\x1b'));
        assert_eq!(strip_ansi(&colored), rendering.to_text());
    }

    #[test]
    fn test_colored_text_too_small() {
        let table = SubstanceTable::builtin();
        let rendering = render(&table, &[], 5, 3, UNIX_EPOCH, &RenderConfig::default());
        let plain = strip_ansi(&colored_text(&rendering, &table));
        assert!(plain.starts_with("Terminal too small (5x3, need 12x6)\n\n● Caffeine"));
    }
}
