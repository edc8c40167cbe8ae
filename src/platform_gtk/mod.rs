use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::{Duration, Instant};

use gtk4 as gtk;
use gtk::glib;
use gtk::prelude::*;
use tracing::warn;

use crate::api::GraphEngine;
use crate::core::Viewport;
use crate::render::{CairoContextRenderer, Renderer};

/// GTK4 host for one graph engine.
///
/// Draws through the engine's cairo path, feeds pointer motion and leave
/// events into hover handling, and keeps redrawing from the frame clock
/// while transitions are in flight.
pub struct GtkGraphView<R: Renderer + CairoContextRenderer + 'static> {
    drawing_area: gtk::DrawingArea,
    engine: Rc<RefCell<GraphEngine<R>>>,
}

impl<R: Renderer + CairoContextRenderer + 'static> GtkGraphView<R> {
    #[must_use]
    pub fn new(engine: GraphEngine<R>) -> Self {
        let engine = Rc::new(RefCell::new(engine));
        let epoch = Instant::now();
        let ticking = Rc::new(Cell::new(false));

        let drawing_area = gtk::DrawingArea::new();
        drawing_area.set_hexpand(true);
        drawing_area.set_vexpand(true);

        drawing_area.set_draw_func({
            let engine = Rc::clone(&engine);
            move |_widget, context, width, height| {
                if width <= 0 || height <= 0 {
                    return;
                }
                let Ok(mut graph) = engine.try_borrow_mut() else {
                    return;
                };
                let viewport = Viewport::new(width as u32, height as u32);
                if let Err(err) = graph.resize(viewport) {
                    warn!(%err, "graph reflow failed");
                    return;
                }
                if let Err(err) = graph.render_on_cairo_context(context, epoch.elapsed()) {
                    warn!(%err, "graph draw failed");
                }
            }
        });

        let motion = gtk::EventControllerMotion::new();
        {
            let engine = Rc::clone(&engine);
            let drawing_area = drawing_area.clone();
            let ticking = Rc::clone(&ticking);
            motion.connect_motion(move |_, x, y| {
                let changed = engine
                    .try_borrow_mut()
                    .is_ok_and(|mut graph| graph.pointer_move(x, y, epoch.elapsed()));
                if changed {
                    animate(&drawing_area, &engine, &ticking, epoch);
                }
            });
        }
        {
            let engine = Rc::clone(&engine);
            let drawing_area = drawing_area.clone();
            let ticking = Rc::clone(&ticking);
            motion.connect_leave(move |_| {
                let changed = engine
                    .try_borrow_mut()
                    .is_ok_and(|mut graph| graph.pointer_leave(epoch.elapsed()));
                if changed {
                    animate(&drawing_area, &engine, &ticking, epoch);
                }
            });
        }
        drawing_area.add_controller(motion);

        Self {
            drawing_area,
            engine,
        }
    }

    #[must_use]
    pub fn widget(&self) -> &gtk::DrawingArea {
        &self.drawing_area
    }

    #[must_use]
    pub fn engine(&self) -> Rc<RefCell<GraphEngine<R>>> {
        Rc::clone(&self.engine)
    }
}

/// Redraws on every frame until no transition is active.
fn animate<R: Renderer + CairoContextRenderer + 'static>(
    drawing_area: &gtk::DrawingArea,
    engine: &Rc<RefCell<GraphEngine<R>>>,
    ticking: &Rc<Cell<bool>>,
    epoch: Instant,
) {
    drawing_area.queue_draw();
    if ticking.replace(true) {
        return;
    }

    let engine = Rc::clone(engine);
    let ticking = Rc::clone(ticking);
    drawing_area.add_tick_callback(move |widget, _clock| {
        widget.queue_draw();
        let now: Duration = epoch.elapsed();
        let animating = engine
            .try_borrow()
            .map_or(true, |graph| graph.is_animating(now));
        if animating {
            glib::ControlFlow::Continue
        } else {
            ticking.set(false);
            glib::ControlFlow::Break
        }
    });
}
