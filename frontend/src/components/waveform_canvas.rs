use soniy_admin_shared::waveform::{self, SceneContent, Zoom};
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};
use yew::prelude::*;

use crate::utils::{describe_js_error, log_error};

const BACKGROUND: &str = "#1a1d27";
const PLACEHOLDER_COLOR: &str = "#6b7280";
const PLACEHOLDER_FONT: &str = "14px Inter";
const BAR_EDGE: &str = "#7c5cfc";
const BAR_CENTER: &str = "#c084fc";
const GRIDLINE: &str = "#2d3140";

#[derive(Properties, PartialEq)]
pub struct WaveformCanvasProps {
    pub peaks: Vec<f32>,
    pub zoom: Zoom,
}

fn context_2d(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
    canvas
        .get_context("2d")
        .ok()
        .flatten()
        .and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok())
}

fn paint(canvas: &HtmlCanvasElement, peaks: &[f32], zoom: Zoom) {
    let scene = waveform::layout(peaks, zoom);
    canvas.set_width(scene.width);
    canvas.set_height(scene.height);
    let Some(ctx) = context_2d(canvas) else {
        return;
    };
    let width = f64::from(scene.width);
    let height = f64::from(scene.height);

    ctx.set_fill_style_str(BACKGROUND);
    ctx.fill_rect(0.0, 0.0, width, height);

    match &scene.content {
        SceneContent::Placeholder {
            label,
            x,
            y,
        } => {
            ctx.set_fill_style_str(PLACEHOLDER_COLOR);
            ctx.set_font(PLACEHOLDER_FONT);
            ctx.set_text_align("center");
            if let Err(err) = ctx.fill_text(label, *x, *y) {
                log_error("waveform placeholder", &describe_js_error(&err));
            }
        },
        SceneContent::Bars {
            bars,
            gridlines,
        } => {
            let gradient = ctx.create_linear_gradient(0.0, 0.0, 0.0, height);
            for (offset, color) in [(0.0, BAR_EDGE), (0.5, BAR_CENTER), (1.0, BAR_EDGE)] {
                if let Err(err) = gradient.add_color_stop(offset, color) {
                    log_error("waveform gradient", &describe_js_error(&err));
                }
            }
            ctx.set_fill_style_canvas_gradient(&gradient);
            for bar in bars {
                ctx.fill_rect(bar.x, bar.y, bar.width, bar.height);
            }

            ctx.set_stroke_style_str(GRIDLINE);
            ctx.set_line_width(1.0);
            for x in gridlines {
                ctx.begin_path();
                ctx.move_to(*x, 0.0);
                ctx.line_to(*x, height);
                ctx.stroke();
            }
        },
    }
}

/// Peak bars for one asset, redrawn whenever the peaks or zoom change.
#[function_component(WaveformCanvas)]
pub fn waveform_canvas(props: &WaveformCanvasProps) -> Html {
    let canvas_ref = use_node_ref();

    {
        let canvas_ref = canvas_ref.clone();
        use_effect_with((props.peaks.clone(), props.zoom), move |(peaks, zoom)| {
            if let Some(canvas) = canvas_ref.cast::<HtmlCanvasElement>() {
                paint(&canvas, peaks, *zoom);
            }
            || ()
        });
    }

    html! {
        <div class="waveform-container">
            <canvas ref={canvas_ref} class="waveform-canvas" />
        </div>
    }
}
