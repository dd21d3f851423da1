use crossterm::event::{Event, KeyCode, MouseEventKind};
use ratatui::backend::{Backend, CrosstermBackend};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Scrollbar, ScrollbarOrientation};
use ratatui::Terminal;

use video_index_tree::{Tree, TreeItem, TreeState, VideoIndex};

struct App {
    state: TreeState<String>,
    items: Vec<TreeItem<'static, String>>,
}

impl App {
    fn new() -> std::io::Result<Self> {
        let index = VideoIndex::from_json_str(include_str!("talk.json"))
            .map_err(|error| std::io::Error::new(std::io::ErrorKind::InvalidData, error))?;
        let items = vec![index.tree_item()?];
        let mut state = TreeState::default();
        state.collapse_initial(&items);
        Ok(Self { state, items })
    }
}

fn main() -> std::io::Result<()> {
    // Terminal initialization
    crossterm::terminal::enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    crossterm::execute!(
        stdout,
        crossterm::terminal::EnterAlternateScreen,
        crossterm::event::EnableMouseCapture
    )?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    // App
    let app = App::new()?;
    let res = run_app(&mut terminal, app);

    // restore terminal
    crossterm::terminal::disable_raw_mode()?;
    crossterm::execute!(
        terminal.backend_mut(),
        crossterm::terminal::LeaveAlternateScreen,
        crossterm::event::DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{err:?}");
    }

    Ok(())
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, mut app: App) -> std::io::Result<()> {
    loop {
        terminal.draw(|frame| {
            let area = frame.size();
            let widget = Tree::new(app.items.clone())
                .expect("all item identifiers are unique")
                .block(
                    Block::bordered()
                        .title("Video Index")
                        .title_bottom("Enter toggles, arrows navigate, i refolds, q quits"),
                )
                .experimental_scrollbar(Some(
                    Scrollbar::new(ScrollbarOrientation::VerticalRight)
                        .begin_symbol(None)
                        .track_symbol(None)
                        .end_symbol(None),
                ))
                .highlight_style(
                    Style::new()
                        .fg(Color::Black)
                        .bg(Color::LightGreen)
                        .add_modifier(Modifier::BOLD),
                )
                .highlight_symbol(">> ");
            frame.render_stateful_widget(widget, area, &mut app.state);
        })?;

        match crossterm::event::read()? {
            Event::Key(key) => match key.code {
                KeyCode::Char('q') => return Ok(()),
                KeyCode::Char('\n' | ' ') => {
                    app.state.toggle_selected(&app.items);
                }
                KeyCode::Char('e') => {
                    app.state.expand_all();
                }
                KeyCode::Char('i') => app.state.collapse_initial(&app.items),
                KeyCode::Left => {
                    app.state.key_left(&app.items);
                }
                KeyCode::Right => {
                    app.state.key_right();
                }
                KeyCode::Down => {
                    app.state.key_down(&app.items);
                }
                KeyCode::Up => {
                    app.state.key_up(&app.items);
                }
                KeyCode::Home => {
                    app.state.select_first(&app.items);
                }
                KeyCode::End => {
                    app.state.select_last(&app.items);
                }
                KeyCode::PageDown => {
                    app.state.scroll_down(3);
                }
                KeyCode::PageUp => {
                    app.state.scroll_up(3);
                }
                _ => {}
            },
            Event::Mouse(mouse) => match mouse.kind {
                MouseEventKind::ScrollDown => {
                    app.state.scroll_down(1);
                }
                MouseEventKind::ScrollUp => {
                    app.state.scroll_up(1);
                }
                _ => {}
            },
            _ => {}
        }
    }
}
