//! Interactive demo: a five-digit code field with Fill and Clear actions.
//!
//! Keys: digits type, Backspace retreats, F2 fills "12345", F3 clears,
//! Enter focuses the first empty box, Esc or Ctrl-C quits. Pasting a code
//! fills every box at once. Set `RUST_LOG=spark_otp=debug` to log to stderr.

use std::cell::{Cell, RefCell};
use std::io::{stdout, Stdout};
use std::rc::Rc;
use std::time::Duration;

use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
};
use crossterm::execute;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use spark_signals::{effect, signal, Signal};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use spark_otp::state::{input, keyboard, mouse};
use spark_otp::{
    otp_field, Attr, DiffRenderer, FrameBuffer, OtpField, OtpFieldProps, Rect, Result, Rgba,
};

const DIGITS: usize = 5;
const FILL_CODE: &str = "12345";
const HELP: &str = "F2 fill  F3 clear  Enter focus  Esc quit";
const MARGIN: u16 = 2;
const TEXT_WIDTH: u16 = 48;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let code = signal(String::new());
    let field = Rc::new(otp_field(OtpFieldProps {
        id: Some("demo".to_string()),
        ..OtpFieldProps::new(DIGITS, code.clone())
    })?);
    field.set_origin(MARGIN, 1);

    // Field row, then status and help lines below it
    let bounds = field.layout()?.bounds;
    let screen = Rect::new(
        0,
        0,
        bounds.right().max(MARGIN + TEXT_WIDTH) + MARGIN,
        bounds.bottom() + 3,
    );

    let renderer = Rc::new(RefCell::new(DiffRenderer::new(stdout())));

    enable_raw_mode()?;
    let result = enter_terminal(&renderer).and_then(|()| run(&field, &code, &renderer, screen));
    let restored = restore_terminal(&renderer);

    match Rc::try_unwrap(field) {
        Ok(field) => field.cleanup(),
        Err(_) => error!("field still shared at exit"),
    }
    info!(code = %code.get(), "demo finished");
    result.and(restored)
}

fn enter_terminal(renderer: &Rc<RefCell<DiffRenderer<Stdout>>>) -> Result<()> {
    execute!(stdout(), EnableBracketedPaste, EnableMouseCapture)?;
    renderer.borrow_mut().enter_fullscreen()?;
    Ok(())
}

/// Undo every terminal mode, even after a failed step. Reports the first error.
fn restore_terminal(renderer: &Rc<RefCell<DiffRenderer<Stdout>>>) -> Result<()> {
    let fullscreen = renderer.borrow_mut().exit_fullscreen();
    let modes = execute!(stdout(), DisableMouseCapture, DisableBracketedPaste);
    let raw = disable_raw_mode();
    fullscreen.and(modes).and(raw)?;
    Ok(())
}

fn run(
    field: &Rc<OtpField>,
    code: &Signal<String>,
    renderer: &Rc<RefCell<DiffRenderer<Stdout>>>,
    screen: Rect,
) -> Result<()> {
    let running = Rc::new(Cell::new(true));

    // Host actions
    let fill_code = code.clone();
    let stop_fill = keyboard::on_key("F2", move || {
        fill_code.set(FILL_CODE.to_string());
        true
    });

    let clear_code = code.clone();
    let clear_field = field.clone();
    let stop_clear = keyboard::on_key("F3", move || {
        clear_code.set(String::new());
        clear_field.activate();
        true
    });

    let focus_field = field.clone();
    let stop_focus = keyboard::on_key("Enter", move || focus_field.activate());

    let running_quit = running.clone();
    let stop_quit = keyboard::on(move |event| {
        let quit = event.key == "Escape" || (event.modifiers.ctrl && event.key == "c");
        if quit {
            running_quit.set(false);
        }
        quit
    });

    // The one render effect
    let render_field = field.clone();
    let render_code = code.clone();
    let render_out = renderer.clone();
    let stop_render = effect(move || {
        let mut buffer = FrameBuffer::new(screen.width, screen.height);
        if let Err(err) = render_field.render(&mut buffer) {
            error!(%err, "field render failed");
            return;
        }
        let pointer = mouse::last_event()
            .map(|event| format!("{},{}", event.x, event.y))
            .unwrap_or_else(|| "-".to_string());
        let status = format!(
            "code: {:<8} key: {:<10} mouse: {}",
            render_code.get(),
            keyboard::last_key(),
            pointer
        );
        let status_y = screen.bottom() - 2;
        buffer.draw_text(MARGIN, status_y, &status, Rgba::WHITE, Attr::NONE);
        buffer.draw_text(MARGIN, status_y + 1, HELP, Rgba::GRAY, Attr::DIM);
        if let Err(err) = render_out.borrow_mut().render(&buffer) {
            error!(%err, "terminal write failed");
        }
    });

    let mut outcome = Ok(());
    while running.get() {
        match input::poll_event(Duration::from_millis(50)) {
            Ok(Some(event)) => {
                input::route_event(event);
            }
            Ok(None) => {}
            Err(err) => {
                outcome = Err(err.into());
                break;
            }
        }
    }

    stop_render();
    stop_quit();
    stop_focus();
    stop_clear();
    stop_fill();
    outcome
}
