use crate::config;
use crate::events::AppEvent;
use crate::gui::stack::{self, RotateOutcome, State};
use crate::gui::theme::{self, ThemeColors};
use crate::sys::status::SharedStatus;
use gtk::prelude::*;
use gtk4 as gtk;
use relm4::prelude::*;
use stackring::Direction;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

pub struct AppModel {
    pub state: Rc<RefCell<State>>,
    pub status: SharedStatus,
    pub root: gtk::ApplicationWindow,
    pub drawing_area: gtk::DrawingArea,
    /// Set while a tick callback is redrawing every frame.
    ticking: Rc<Cell<bool>>,
}

#[derive(Debug)]
pub enum AppMsg {
    Rotate(Direction),
    Scroll(f64),
    Reset,
    ConfigReload,
    Close,
}

impl From<AppEvent> for AppMsg {
    fn from(event: AppEvent) -> Self {
        match event {
            AppEvent::Rotate(d) => AppMsg::Rotate(d),
            AppEvent::Reset => AppMsg::Reset,
            AppEvent::ConfigReload => AppMsg::ConfigReload,
        }
    }
}

#[relm4::component(pub)]
impl SimpleComponent for AppModel {
    type Init = (State, SharedStatus, async_channel::Receiver<AppEvent>);
    type Input = AppMsg;
    type Output = ();

    view! {
        #[root]
        #[name = "window"]
        gtk::ApplicationWindow {
            set_title: Some("Photo Stack"),
            set_default_size: (1280, 800),
            add_css_class: "photostack-window",

            add_controller = gtk::EventControllerKey {
                connect_key_pressed[sender] => move |_, key, _, _| {
                    let msg = match key {
                        gtk::gdk::Key::Up => AppMsg::Rotate(Direction::Up),
                        gtk::gdk::Key::Down => AppMsg::Rotate(Direction::Down),
                        gtk::gdk::Key::r | gtk::gdk::Key::R => AppMsg::Reset,
                        gtk::gdk::Key::Escape => AppMsg::Close,
                        _ => return glib::Propagation::Proceed,
                    };
                    sender.input(msg);
                    glib::Propagation::Stop
                }
            },

            #[name = "drawing_area"]
            gtk::DrawingArea {
                set_hexpand: true,
                set_vexpand: true,
                add_css_class: "photostack-drawing-area",

                add_controller = gtk::EventControllerScroll {
                    set_flags: gtk::EventControllerScrollFlags::VERTICAL,
                    connect_scroll[sender] => move |_, _, dy| {
                        sender.input(AppMsg::Scroll(dy));
                        glib::Propagation::Stop
                    }
                }
            }
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let (state, status, rx) = init;

        theme::load_css();

        let model = AppModel {
            state: Rc::new(RefCell::new(state)),
            status,
            root: root.clone(),
            drawing_area: gtk::DrawingArea::default(),
            ticking: Rc::new(Cell::new(false)),
        };

        let widgets = view_output!();

        let mut model = model;
        model.drawing_area = widgets.drawing_area.clone();

        let state_draw = model.state.clone();
        widgets
            .drawing_area
            .set_draw_func(move |drawing_area, cr, width, height| {
                let style_context = drawing_area.style_context();
                let colors = ThemeColors::from_context(&style_context);
                if let Err(e) = stack::draw(
                    cr,
                    &state_draw.borrow(),
                    &colors,
                    width as f64,
                    height as f64,
                ) {
                    log::error!("Drawing error: {}", e);
                }
            });

        let sender_clone = sender.clone();
        relm4::spawn(async move {
            while let Ok(event) = rx.recv().await {
                sender_clone.input(AppMsg::from(event));
            }
        });

        model.publish_status();
        model.animate();

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, _sender: ComponentSender<Self>) {
        match msg {
            AppMsg::Rotate(direction) => self.rotate(direction),
            AppMsg::Scroll(dy) => {
                let direction = self.state.borrow().scroll_direction(dy);
                if let Some(direction) = direction {
                    self.rotate(direction);
                }
            }
            AppMsg::Reset => {
                self.state.borrow_mut().reset();
                self.changed();
            }
            AppMsg::ConfigReload => match config::load_config() {
                Ok(new_config) => {
                    self.state.borrow_mut().reload(&new_config);
                    self.changed();
                    log::info!("Configuration reloaded");
                }
                Err(e) => log::error!("Failed to reload config: {}", e),
            },
            AppMsg::Close => self.root.close(),
        }
    }
}

impl AppModel {
    fn rotate(&mut self, direction: Direction) {
        let outcome = self.state.borrow_mut().rotate(direction);
        match outcome {
            Ok(RotateOutcome::Rotated { wrap_reset }) => {
                log::debug!("Rotated {} (wrap reset: {})", direction, wrap_reset);
                self.changed();
            }
            Ok(RotateOutcome::Throttled) => log::trace!("Rotation {} throttled", direction),
            Ok(RotateOutcome::Empty) => {}
            Err(e) => {
                log::error!("Rotation failed, rebuilding the stack: {}", e);
                self.state.borrow_mut().reset();
                self.changed();
            }
        }
    }

    fn changed(&self) {
        self.publish_status();
        self.animate();
    }

    fn publish_status(&self) {
        *self.status.write() = self.state.borrow().status();
    }

    /// Redraws every frame until all motions have settled.
    fn animate(&self) {
        self.drawing_area.queue_draw();
        if self.ticking.replace(true) {
            return;
        }

        let state = self.state.clone();
        let ticking = self.ticking.clone();
        self.drawing_area.add_tick_callback(move |area, _clock| {
            area.queue_draw();
            if state.borrow().is_animating() {
                glib::ControlFlow::Continue
            } else {
                ticking.set(false);
                glib::ControlFlow::Break
            }
        });
    }
}
