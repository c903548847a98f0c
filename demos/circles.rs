//! A circle chart that is re-rendered on every state change.
//!
//! Run with `RUST_LOG=rememo=trace cargo run --example circles` to see which
//! steps are skipped.

use std::rc::Rc;

use rememo::{Memoizer, Store};

fn main() {
    env_logger::init();

    let mut app = App::new(960.0, 500.0);
    app.render(); // [Miss] Extent and layout are computed.
    app.select(3); // [Hit] Only the selection changed.
    app.select(3); // [Hit] Deselecting reuses everything as well.
    app.resize(480.0, 250.0);
    app.render(); // [Miss] The layout depends on the size, the extent is reused.
    app.render(); // [Hit] Nothing changed.
}

/// A circle in data coordinates.
#[derive(Debug, Clone, Copy)]
struct Datum {
    x: f64,
    y: f64,
    r: f64,
    fill: &'static str,
}

/// A circle in screen coordinates.
#[derive(Debug, Clone)]
struct Circle {
    id: usize,
    cx: f64,
    cy: f64,
    r: f64,
    fill: &'static str,
}

/// Application state, replaced wholesale on every change.
#[derive(Debug, Clone, Default)]
struct State {
    selected: Option<usize>,
}

/// Owns the rendering target and re-renders on every state change.
struct App {
    /// The rendering target. Memoized values are attached to it.
    target: Store,
    width: f64,
    height: f64,
    data: Rc<[Datum]>,
    state: State,
}

impl App {
    fn new(width: f64, height: f64) -> Self {
        Self {
            target: Store::new(),
            width,
            height,
            data: Rc::from(DATA),
            state: State::default(),
        }
    }

    fn select(&mut self, id: usize) {
        let selected = self.state.selected;
        self.state = State {
            selected: if selected == Some(id) { None } else { Some(id) },
        };
        self.render();
    }

    fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    /// One rendering pass.
    fn render(&self) {
        let memo = Memoizer::new(&self.target);

        let extent = memo.memoize(
            || {
                println!("  computing extent");
                self.data.iter().fold((0.0f64, 0.0f64), |(w, h), d| {
                    (w.max(d.x + d.r), h.max(d.y + d.r))
                })
            },
            (self.data.clone(),),
        );

        let circles: Rc<[Circle]> = memo.memoize(
            || {
                println!("  computing layout");
                let k = (self.width / extent.0).min(self.height / extent.1);
                self.data
                    .iter()
                    .enumerate()
                    .map(|(id, d)| Circle {
                        id,
                        cx: d.x * k,
                        cy: d.y * k,
                        r: d.r * k,
                        fill: d.fill,
                    })
                    .collect()
            },
            (self.data.clone(), self.width, self.height, extent.0, extent.1),
        );

        let mut svg = String::new();
        for circle in circles.iter() {
            let selected = self.state.selected == Some(circle.id);
            let stroke = if selected { "black" } else { "none" };
            svg.push_str(&format!(
                "<circle cx=\"{:.0}\" cy=\"{:.0}\" r=\"{:.0}\" \
                 fill=\"{}\" stroke=\"{stroke}\"/>\n",
                circle.cx, circle.cy, circle.r, circle.fill,
            ));
        }

        println!(
            "rendered {} circles at {}x{} (selected: {:?})",
            circles.len(),
            self.width,
            self.height,
            self.state.selected,
        );
        print!("{svg}");
    }
}

const DATA: [Datum; 7] = [
    Datum { x: 155.0, y: 382.0, r: 20.0, fill: "#D4089D" },
    Datum { x: 340.0, y: 238.0, r: 52.0, fill: "#FF0AAE" },
    Datum { x: 531.0, y: 59.0, r: 20.0, fill: "#00FF88" },
    Datum { x: 482.0, y: 275.0, r: 147.0, fill: "#7300FF" },
    Datum { x: 781.0, y: 303.0, r: 61.0, fill: "#0FFB33" },
    Datum { x: 668.0, y: 229.0, r: 64.0, fill: "#D400FF" },
    Datum { x: 316.0, y: 396.0, r: 85.0, fill: "#0FF0FF" },
];
