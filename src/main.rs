use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use color_eyre::eyre::Result;
use crossterm::event::KeyCode;
use ratatui::layout::{Constraint, Layout};
use tokio::sync::mpsc;

use p9s::action::Action;
use p9s::app::{App, Effect, InputMode, Overlay, View};
use p9s::client::{PlaybooksClient, RestPlaybooksClient};
use p9s::config::{Cli, ConfigFile};
use p9s::domain::NameDisplay;
use p9s::event::{key_to_action, AppEvent, RawEventHandler};
use p9s::timeline::FilterOption;
use p9s::widgets;
use p9s::worker::{ApiHandle, ApiRequest, ApiWorker};

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    dotenvy::dotenv().ok();

    let mut cli = Cli::parse();
    if let Some(file) = ConfigFile::load() {
        if cli.token.is_none() {
            cli.token = file.token;
        }
        if cli.team.is_none() {
            cli.team = file.team;
        }
        if cli.name_display.is_none() {
            cli.name_display = file.name_display;
        }
        if let Some(url) = file.url {
            if cli.url == "http://localhost:8065" {
                cli.url = url;
            }
        }
    }

    // Set up logging
    if let Some(ref log_file) = cli.log_file {
        let file = std::fs::File::create(log_file)?;
        tracing_subscriber::fmt()
            .with_writer(file)
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .init();
    }

    run_tui(cli).await
}

async fn run_tui(cli: Cli) -> Result<()> {
    let Some(token) = cli.token.clone() else {
        eprintln!("No access token configured.");
        eprintln!();
        eprintln!("Set P9S_TOKEN, pass --token, or add `token` to the config file.");
        std::process::exit(1);
    };

    let client = match RestPlaybooksClient::connect(&cli.url, &token).await {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to connect to {}: {}", cli.url, e);
            eprintln!();
            eprintln!("Make sure the server is reachable and the token is valid.");
            eprintln!("  P9S_URL={}", cli.url);
            std::process::exit(1);
        }
    };
    let client: Arc<dyn PlaybooksClient> = Arc::new(client);

    let name_display = cli
        .name_display
        .as_deref()
        .map(NameDisplay::parse)
        .unwrap_or_default();

    // Initialize app state
    let mut app = App::new(cli.team.clone(), name_display);
    app.polling_interval = Duration::from_secs(cli.poll_interval);
    app.base_polling_interval = Duration::from_secs(cli.poll_interval);
    app.connection_status = p9s::app::ConnectionStatus::Connected;

    // Set up channels
    let (action_tx, mut action_rx) = mpsc::unbounded_channel::<Action>();

    // Create worker
    let (worker, api_handle) = ApiWorker::new(client.clone(), action_tx.clone());
    tokio::spawn(worker.run());

    // Initial data load
    api_handle.send(ApiRequest::LoadRuns {
        team_id: app.team_id.clone(),
        search: None,
        page: 0,
        per_page: app.page_size,
    });

    // Set up terminal
    let mut terminal = p9s::tui::init()?;

    // Set up event handler
    let mut events = RawEventHandler::new(Duration::from_secs(1));

    // Main loop
    loop {
        terminal.draw(|frame| render(&mut app, frame))?;

        tokio::select! {
            Some(event) = events.next() => {
                match event {
                    AppEvent::Key(key) => {
                        // Confirm modal needs app state to resolve
                        if matches!(app.overlay, Overlay::Confirm(_)) {
                            match key.code {
                                KeyCode::Char('y') | KeyCode::Enter => {
                                    let effects = app.confirm_pending();
                                    handle_effects(effects, &api_handle, &client, &action_tx, &app);
                                    continue;
                                }
                                KeyCode::Char('n') | KeyCode::Esc => {
                                    app.overlay = Overlay::None;
                                    continue;
                                }
                                _ => continue,
                            }
                        }

                        // Filter menu keys (needs app state)
                        if app.overlay == Overlay::FilterMenu {
                            match key.code {
                                KeyCode::Char('j') | KeyCode::Down => {
                                    app.filter_menu_state.select_next();
                                    continue;
                                }
                                KeyCode::Char('k') | KeyCode::Up => {
                                    app.filter_menu_state.select_previous();
                                    continue;
                                }
                                KeyCode::Char(' ') | KeyCode::Enter => {
                                    if let Some(option) = app
                                        .filter_menu_state
                                        .selected()
                                        .and_then(|idx| FilterOption::ALL.get(idx))
                                    {
                                        let effects =
                                            app.update(Action::ToggleFilterOption(*option));
                                        handle_effects(
                                            effects, &api_handle, &client, &action_tx, &app,
                                        );
                                    }
                                    continue;
                                }
                                KeyCode::Char('g') => {
                                    app.filter_menu_state.select_first();
                                    continue;
                                }
                                KeyCode::Char('G') => {
                                    app.filter_menu_state.select_last();
                                    continue;
                                }
                                _ => {} // Fall through to key_to_action for Esc
                            }
                        }

                        if let Some(action) = key_to_action(
                            key,
                            &app.view,
                            app.detail_tab,
                            &app.input_mode,
                            &app.overlay,
                            &app.input_buffer,
                        ) {
                            let effects = app.update(action);
                            handle_effects(effects, &api_handle, &client, &action_tx, &app);
                        }
                    }
                    AppEvent::Tick => {
                        let effects = app.update(Action::Tick);
                        handle_effects(effects, &api_handle, &client, &action_tx, &app);
                    }
                }
            }
            Some(action) = action_rx.recv() => {
                let effects = app.update(action);
                handle_effects(effects, &api_handle, &client, &action_tx, &app);
            }
        }

        if app.should_quit {
            break;
        }
    }

    p9s::tui::restore()?;

    Ok(())
}

fn render(app: &mut App, frame: &mut ratatui::Frame) {
    let area = frame.area();

    frame.render_widget(
        ratatui::widgets::Block::default()
            .style(ratatui::style::Style::default().bg(p9s::theme::BG_DARK)),
        area,
    );

    let layout = Layout::vertical([
        Constraint::Length(1), // Tab bar
        Constraint::Fill(1),   // Content
        Constraint::Length(1), // Footer
    ])
    .split(area);

    widgets::tab_bar::render(app, frame, layout[0]);

    let content_area = layout[1];
    match app.view {
        View::RunList => widgets::run_list::render(app, frame, content_area),
        View::RunDetail => widgets::run_detail::render(app, frame, content_area),
    }

    widgets::footer::render(app, frame, layout[2]);

    // Overlays
    match &app.overlay {
        Overlay::Help => widgets::help_overlay::render(&app.view, frame, area),
        Overlay::Confirm(action) => widgets::confirm_modal::render(action, frame, area),
        Overlay::FilterMenu => widgets::filter_menu::render(app, frame, area),
        Overlay::None => {}
    }

    // Input mode overlays
    if matches!(app.input_mode, InputMode::Command | InputMode::Search) {
        let input_area = ratatui::layout::Rect {
            x: area.x,
            y: area.y + area.height.saturating_sub(2),
            width: area.width,
            height: 1,
        };
        widgets::command_input::render(app, frame, input_area);
        let suggestion_area = ratatui::layout::Rect {
            x: area.x,
            y: area.y + area.height.saturating_sub(3),
            width: area.width,
            height: 1,
        };
        widgets::command_input::render_suggestions(app, frame, suggestion_area);
    } else {
        widgets::error_toast::render(app, frame, area);
    }
}

fn handle_effects(
    effects: Vec<Effect>,
    api_handle: &ApiHandle,
    client: &Arc<dyn PlaybooksClient>,
    action_tx: &mpsc::UnboundedSender<Action>,
    app: &App,
) {
    for effect in effects {
        match effect {
            Effect::LoadRuns => {
                api_handle.send(ApiRequest::LoadRuns {
                    team_id: app.team_id.clone(),
                    search: app.search_query.clone(),
                    page: 0,
                    per_page: app.page_size,
                });
            }
            Effect::LoadMoreRuns => {
                api_handle.send(ApiRequest::LoadMoreRuns {
                    team_id: app.team_id.clone(),
                    search: app.search_query.clone(),
                    page: app.page,
                    per_page: app.page_size,
                });
            }
            Effect::LoadRun(run_id) => {
                api_handle.send(ApiRequest::LoadRun { run_id });
            }
            Effect::LoadRunByChannel(channel_id) => {
                api_handle.send(ApiRequest::LoadRunByChannel { channel_id });
            }
            Effect::ResolveTimeline { run, generation } => {
                api_handle.send(ApiRequest::ResolveTimeline {
                    run,
                    name_display: app.name_display,
                    generation,
                });
            }
            Effect::RemoveTimelineEvent { run_id, event_id } => {
                api_handle.send(ApiRequest::RemoveTimelineEvent { run_id, event_id });
            }
            Effect::ExportChannel(channel_id) => {
                let url = client.export_channel_url(&channel_id);
                let _ = action_tx.send(Action::Notice(format!("Export: {}", url)));
            }
            Effect::Quit => {}
        }
    }
}
