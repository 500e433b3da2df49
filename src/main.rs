use syslog_panel::app::App;
use syslog_panel::config::PanelConfig;
use syslog_panel::util::log::init_tracing;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    init_tracing();

    let path = PanelConfig::resolve_path(std::env::args().nth(1));
    let config = PanelConfig::load_from_path(&path)?;

    let app = App::new(config).await?;
    let terminal = ratatui::init();
    let result = app.run(terminal).await;
    ratatui::restore();
    result
}
