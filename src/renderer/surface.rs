//! Drawing surface abstraction
//!
//! The scene painter talks to this trait instead of the canvas directly, so
//! it can run natively against a [`Recorder`] in tests. The method set is
//! the subset of `CanvasRenderingContext2d` the game needs.

pub trait Surface {
    fn save(&mut self);
    fn restore(&mut self);
    fn clear(&mut self, width: f64, height: f64);

    fn set_alpha(&mut self, alpha: f64);
    fn set_fill(&mut self, color: &str);
    fn set_stroke(&mut self, color: &str);
    fn set_line_width(&mut self, width: f64);
    fn set_line_cap(&mut self, cap: &str);
    fn set_line_dash(&mut self, segments: &[f64]);
    fn set_line_dash_offset(&mut self, offset: f64);

    fn begin_path(&mut self);
    fn move_to(&mut self, x: f64, y: f64);
    fn line_to(&mut self, x: f64, y: f64);
    fn close_path(&mut self);
    fn arc(&mut self, x: f64, y: f64, radius: f64, start: f64, end: f64);
    fn fill(&mut self);
    fn stroke(&mut self);
    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64);

    fn translate(&mut self, x: f64, y: f64);
    fn rotate(&mut self, angle: f64);

    fn set_font(&mut self, font: &str);
    fn set_text_align(&mut self, align: &str);
    fn set_text_baseline(&mut self, baseline: &str);
    fn fill_text(&mut self, text: &str, x: f64, y: f64);
}

/// One recorded draw call that produced pixels
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Clear,
    Fill { color: String, alpha: f64 },
    Stroke { color: String, alpha: f64, dashed: bool },
    FillRect { color: String, alpha: f64, x: f64, y: f64, width: f64, height: f64 },
    Text { text: String, font: String, align: String, x: f64, y: f64 },
}

#[derive(Debug, Clone)]
struct Style {
    alpha: f64,
    fill: String,
    stroke: String,
    dash: Vec<f64>,
    font: String,
    align: String,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            alpha: 1.0,
            fill: "#000000".to_string(),
            stroke: "#000000".to_string(),
            dash: Vec::new(),
            font: "10px sans-serif".to_string(),
            align: "start".to_string(),
        }
    }
}

/// Records what would be painted, tracking the style stack like a canvas
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    pub commands: Vec<Command>,
    style: Style,
    stack: Vec<Style>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// All text drawn, in order
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                Command::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Whether every save had a matching restore
    pub fn balanced(&self) -> bool {
        self.stack.is_empty()
    }
}

impl Surface for Recorder {
    fn save(&mut self) {
        self.stack.push(self.style.clone());
    }

    fn restore(&mut self) {
        if let Some(style) = self.stack.pop() {
            self.style = style;
        }
    }

    fn clear(&mut self, _width: f64, _height: f64) {
        self.commands.push(Command::Clear);
    }

    fn set_alpha(&mut self, alpha: f64) {
        self.style.alpha = alpha;
    }

    fn set_fill(&mut self, color: &str) {
        self.style.fill = color.to_string();
    }

    fn set_stroke(&mut self, color: &str) {
        self.style.stroke = color.to_string();
    }

    fn set_line_width(&mut self, _width: f64) {}

    fn set_line_cap(&mut self, _cap: &str) {}

    fn set_line_dash(&mut self, segments: &[f64]) {
        self.style.dash = segments.to_vec();
    }

    fn set_line_dash_offset(&mut self, _offset: f64) {}

    fn begin_path(&mut self) {}

    fn move_to(&mut self, _x: f64, _y: f64) {}

    fn line_to(&mut self, _x: f64, _y: f64) {}

    fn close_path(&mut self) {}

    fn arc(&mut self, _x: f64, _y: f64, _radius: f64, _start: f64, _end: f64) {}

    fn fill(&mut self) {
        self.commands.push(Command::Fill {
            color: self.style.fill.clone(),
            alpha: self.style.alpha,
        });
    }

    fn stroke(&mut self) {
        self.commands.push(Command::Stroke {
            color: self.style.stroke.clone(),
            alpha: self.style.alpha,
            dashed: !self.style.dash.is_empty(),
        });
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.commands.push(Command::FillRect {
            color: self.style.fill.clone(),
            alpha: self.style.alpha,
            x,
            y,
            width,
            height,
        });
    }

    fn translate(&mut self, _x: f64, _y: f64) {}

    fn rotate(&mut self, _angle: f64) {}

    fn set_font(&mut self, font: &str) {
        self.style.font = font.to_string();
    }

    fn set_text_align(&mut self, align: &str) {
        self.style.align = align.to_string();
    }

    fn set_text_baseline(&mut self, _baseline: &str) {}

    fn fill_text(&mut self, text: &str, x: f64, y: f64) {
        self.commands.push(Command::Text {
            text: text.to_string(),
            font: self.style.font.clone(),
            align: self.style.align.clone(),
            x,
            y,
        });
    }
}

#[cfg(target_arch = "wasm32")]
mod web {
    use wasm_bindgen::JsValue;
    use web_sys::CanvasRenderingContext2d;

    use super::Surface;

    // Canvas calls that return Result only fail on invalid arguments
    // (negative radius, non-finite numbers); a skipped shape is fine.
    impl Surface for CanvasRenderingContext2d {
        fn save(&mut self) {
            CanvasRenderingContext2d::save(self);
        }

        fn restore(&mut self) {
            CanvasRenderingContext2d::restore(self);
        }

        fn clear(&mut self, width: f64, height: f64) {
            self.clear_rect(0.0, 0.0, width, height);
        }

        fn set_alpha(&mut self, alpha: f64) {
            self.set_global_alpha(alpha);
        }

        fn set_fill(&mut self, color: &str) {
            self.set_fill_style_str(color);
        }

        fn set_stroke(&mut self, color: &str) {
            self.set_stroke_style_str(color);
        }

        fn set_line_width(&mut self, width: f64) {
            CanvasRenderingContext2d::set_line_width(self, width);
        }

        fn set_line_cap(&mut self, cap: &str) {
            CanvasRenderingContext2d::set_line_cap(self, cap);
        }

        fn set_line_dash(&mut self, segments: &[f64]) {
            let array: js_sys::Array = segments.iter().map(|v| JsValue::from_f64(*v)).collect();
            let _ = CanvasRenderingContext2d::set_line_dash(self, &array);
        }

        fn set_line_dash_offset(&mut self, offset: f64) {
            CanvasRenderingContext2d::set_line_dash_offset(self, offset);
        }

        fn begin_path(&mut self) {
            CanvasRenderingContext2d::begin_path(self);
        }

        fn move_to(&mut self, x: f64, y: f64) {
            CanvasRenderingContext2d::move_to(self, x, y);
        }

        fn line_to(&mut self, x: f64, y: f64) {
            CanvasRenderingContext2d::line_to(self, x, y);
        }

        fn close_path(&mut self) {
            CanvasRenderingContext2d::close_path(self);
        }

        fn arc(&mut self, x: f64, y: f64, radius: f64, start: f64, end: f64) {
            let _ = CanvasRenderingContext2d::arc(self, x, y, radius.max(0.0), start, end);
        }

        fn fill(&mut self) {
            CanvasRenderingContext2d::fill(self);
        }

        fn stroke(&mut self) {
            CanvasRenderingContext2d::stroke(self);
        }

        fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
            CanvasRenderingContext2d::fill_rect(self, x, y, width, height);
        }

        fn translate(&mut self, x: f64, y: f64) {
            let _ = CanvasRenderingContext2d::translate(self, x, y);
        }

        fn rotate(&mut self, angle: f64) {
            let _ = CanvasRenderingContext2d::rotate(self, angle);
        }

        fn set_font(&mut self, font: &str) {
            CanvasRenderingContext2d::set_font(self, font);
        }

        fn set_text_align(&mut self, align: &str) {
            CanvasRenderingContext2d::set_text_align(self, align);
        }

        fn set_text_baseline(&mut self, baseline: &str) {
            CanvasRenderingContext2d::set_text_baseline(self, baseline);
        }

        fn fill_text(&mut self, text: &str, x: f64, y: f64) {
            let _ = CanvasRenderingContext2d::fill_text(self, text, x, y);
        }
    }
}
