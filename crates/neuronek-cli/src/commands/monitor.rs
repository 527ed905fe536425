use std::time::Duration;

pub fn run(refresh: f64, window_hours: Option<f64>, substances: Option<&str>, config: Option<&str>) {
    let refresh_rate = match Duration::try_from_secs_f64(refresh) {
        Ok(d) if !d.is_zero() => d,
        _ => {
            eprintln!("Error: --refresh must be a positive number of seconds");
            std::process::exit(1);
        }
    };
    let table = super::load_substances(substances);
    let config = super::load_config(config, window_hours);

    let mut app = crate::tui::app::App::new(table, config, refresh_rate);
    if let Err(e) = app.run() {
        eprintln!("TUI error: {e}");
        std::process::exit(1);
    }
}
