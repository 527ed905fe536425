use neuronek_core::{SubstanceSpec, SubstanceTable};

pub fn run(substances: Option<&str>, json: bool) {
    let table = super::load_substances(substances);

    if json {
        let specs: Vec<SubstanceSpec> = table.iter().map(|(_, s)| s.to_spec()).collect();
        match serde_json::to_string_pretty(&specs) {
            Ok(text) => println!("{text}"),
            Err(e) => {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        }
        return;
    }

    print!("{}", format_table(&table));
}

fn format_table(table: &SubstanceTable) -> String {
    let mut out = format!("{:<4} {:<16} {:>10}  {}\n", "Sym", "Name", "Half-life", "Colour");
    out.push_str(&format!("{}\n", "─".repeat(42)));
    for (_, s) in table.iter() {
        let hours = s.half_life().as_secs_f64() / 3600.0;
        out.push_str(&format!(
            "{:<4} {:<16} {:>9}h  {}\n",
            s.symbol(),
            s.name(),
            format!("{hours}"),
            s.color()
        ));
    }
    out.push_str(&format!("\n{} substances\n", table.len()));
    out
}
