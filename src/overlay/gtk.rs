//! GTK4 + layer-shell overlay that runs on the **main thread**.
//!
//! A single borderless, click-through layer-shell window anchored to
//! the bottom screen edge holds one `DrawingArea` for the pill.  All
//! mutable application state lives in an [`App`] context struct owned
//! by the UI thread; callbacks share it through `Rc<RefCell<_>>`, so no
//! locks are needed and no two mutations can interleave.
//!
//! A single ~60 Hz tick drives everything: it drains the cross-thread
//! event channel into the debounce machine, advances fades and
//! deadlines, refreshes workspace state when a show fires, and queues
//! redraws.  Signals are delivered through GLib's main-loop dispatcher
//! (`unix_signal_add_local`), never raw handlers.

use crate::config::OverlayConfig;
use crate::overlay::draw;
use crate::overlay::state::{OverlayState, Timings, TICK};
use crate::palette::Palette;
use crate::traits::WorkspaceQuery;
use crate::traits::WmEvent;
use crate::workspaces::Tracker;
use gtk4::gdk;
use gtk4::glib;
use gtk4::prelude::*;
use gtk4_layer_shell::{Edge, KeyboardMode, Layer, LayerShell};
use log::{debug, info, warn};
use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;
use std::sync::mpsc;
use std::time::Instant;

// The window itself must not paint a themed background; everything
// visible comes from the cairo draw function.
const DEFAULT_CSS: &str = r#"
window,
window.background {
    background-color: transparent;
    background: none;
}
"#;

/// Mutable application state, owned by the UI thread and passed into
/// every callback.
struct App<Q: WorkspaceQuery> {
    tracker: Tracker<Q>,
    palette: Palette,
    state: OverlayState,
    config: OverlayConfig,
}

/// Run the GLib main loop on the **current** (main) thread.
///
/// Returns when a termination signal quits the loop.
pub fn run_main_loop<Q: WorkspaceQuery + 'static>(
    tracker: Tracker<Q>,
    palette: Palette,
    palette_path: PathBuf,
    events: mpsc::Receiver<WmEvent>,
    config: OverlayConfig,
) {
    gtk4::init().expect("failed to initialise GTK4");
    info!("GTK4 initialised on main thread");

    load_css();

    //  Layer-shell overlay window
    let window = gtk4::Window::new();
    window.init_layer_shell();
    window.set_layer(Layer::Overlay);
    window.set_namespace("hyprpill");
    window.set_anchor(Edge::Bottom, true);
    window.set_margin(Edge::Bottom, config.margin_bottom);
    window.set_keyboard_mode(KeyboardMode::None);
    window.set_decorated(false);
    window.remove_css_class("background");

    // Empty input region: the pill never swallows clicks.
    window.connect_map(|window| {
        if let Some(surface) = window.surface() {
            surface.set_input_region(&gtk4::cairo::Region::create());
        }
    });

    let area = gtk4::DrawingArea::new();
    let (w, h) = draw::surface_size(config.persistent_slots, &config);
    area.set_content_width(w);
    area.set_content_height(h);
    window.set_child(Some(&area));

    let app = Rc::new(RefCell::new(App {
        tracker,
        palette,
        state: OverlayState::new(Timings::from(&config)),
        config,
    }));

    {
        let app = Rc::clone(&app);
        area.set_draw_func(move |_, cr, width, height| {
            let app = app.borrow();
            if let Err(e) = draw::draw_indicator(
                cr,
                width as f64,
                height as f64,
                app.state.opacity(),
                app.tracker.state(),
                app.tracker.dot_count(),
                &app.palette,
                &app.config,
            ) {
                warn!("draw failed: {}", e);
            }
        });
    }

    //  Map the surface up front, fully transparent
    window.set_opacity(0.0);
    window.present();
    info!("overlay mapped (hidden) at {}x{}", w, h);

    //  Cooperative tick: events → debounce → fade → redraw
    {
        let app = Rc::clone(&app);
        let window = window.clone();
        let area = area.clone();
        let mut events = Some(events);
        glib::timeout_add_local(TICK, move || {
            let now = Instant::now();
            let mut app = app.borrow_mut();

            if let Some(rx) = &events {
                loop {
                    match rx.try_recv() {
                        Ok(event) => {
                            debug!("trigger: {:?}", event);
                            app.state.trigger(now);
                        }
                        Err(mpsc::TryRecvError::Empty) => break,
                        Err(mpsc::TryRecvError::Disconnected) => {
                            info!("event channel closed; continuing on signals only");
                            events = None;
                            break;
                        }
                    }
                }
            }

            let tick = app.state.tick(now);

            if tick.show_due {
                app.tracker.refresh();
                if app.tracker.state().is_showable() {
                    let (w, h) = draw::surface_size(app.tracker.dot_count(), &app.config);
                    area.set_content_width(w);
                    area.set_content_height(h);
                    window.set_opacity(1.0);
                    app.state.begin_show(now);
                    area.queue_draw();
                } else {
                    debug!(
                        "show suppressed for workspace {}",
                        app.tracker.state().current()
                    );
                }
            }

            if tick.redraw {
                area.queue_draw();
            }
            if tick.faded_out {
                window.set_opacity(0.0);
            }

            glib::ControlFlow::Continue
        });
    }

    //  Signals, dispatched on the main loop
    let main_loop = glib::MainLoop::new(None, false);

    {
        let app = Rc::clone(&app);
        glib::unix_signal_add_local(libc::SIGUSR1, move || {
            debug!("SIGUSR1: manual show");
            app.borrow_mut().state.trigger(Instant::now());
            glib::ControlFlow::Continue
        });
    }
    {
        let app = Rc::clone(&app);
        let area = area.clone();
        glib::unix_signal_add_local(libc::SIGUSR2, move || {
            info!("SIGUSR2: reloading palette");
            app.borrow_mut().palette.load(&palette_path);
            area.queue_draw();
            glib::ControlFlow::Continue
        });
    }
    for signal in [libc::SIGTERM, libc::SIGINT] {
        let main_loop = main_loop.clone();
        glib::unix_signal_add_local(signal, move || {
            info!("shutdown signal received");
            main_loop.quit();
            glib::ControlFlow::Break
        });
    }

    info!("entering GLib main loop");
    main_loop.run();
    info!("GLib main loop exited");
}

fn load_css() {
    let provider = gtk4::CssProvider::new();
    #[allow(deprecated)]
    provider.load_from_data(DEFAULT_CSS);

    if let Some(display) = gdk::Display::default() {
        gtk4::style_context_add_provider_for_display(
            &display,
            &provider,
            gtk4::STYLE_PROVIDER_PRIORITY_APPLICATION,
        );
    } else {
        warn!("no GDK display — CSS will not be applied");
    }
}
