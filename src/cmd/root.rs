use crate::data::{LifeConfig, PlaceholderStore};
use crate::ui::life_view::{run_app, App};
use crate::ui::{restore_terminal, setup_terminal};
use anyhow::Result;
use chrono::Local;

pub fn run() -> Result<()> {
    let config = LifeConfig::load()?;
    let mut store = PlaceholderStore;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = crossterm::terminal::disable_raw_mode();
        let _ = crossterm::execute!(
            std::io::stdout(),
            crossterm::terminal::LeaveAlternateScreen,
            crossterm::event::DisableMouseCapture
        );
        original_hook(info);
    }));

    let mut terminal = setup_terminal()?;

    // Captured once; the grid does not advance while the session runs.
    let today = Local::now().date_naive();
    let mut app = App::new(config, today, &mut store);
    log::info!("starting grid for {today}");

    let result = run_app(&mut terminal, &mut app);

    restore_terminal(&mut terminal)?;

    result
}
