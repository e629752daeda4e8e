//! Interactive checkpoint map export.
//!
//! Produces a self-contained HTML page that loads the Desmos graphing
//! calculator and draws every checkpoint line, the quadrilaterals
//! between neighbors, and the regions where ghost checkpoints can be
//! triggered. Colors: blue for plain checkpoints, green for the lap
//! start, purple for other key checkpoints, red for ghost checkpoints
//! and their trigger regions, orange for split-path overlays.

use trackbreak_kmp::Kmp;

use crate::gcp::{neighbors, Bounds};

const RED: &str = "#c74440";
const BLUE: &str = "#2d70b3";
const GREEN: &str = "#388c46";
const PURPLE: &str = "#6042a6";
const ORANGE: &str = "#fa7e19";

const TEMPLATE: &str = r#"
    <!DOCTYPE html>
    <script src="https://www.desmos.com/api/v1.7/calculator.js?apiKey=dcb31709b452b1cf9dc26972add0fda6"></script>
    <div id="calculator" style="width: 100%; height: 50vw;"></div>
    <script>
        var elt = document.getElementById('calculator');
        var calculator = Desmos.GraphingCalculator(elt, 
            { expressions: false, showGrid: false, showXAxis: false, showYAxis: false });
        calculator.setMathBounds({ left: -200000, right: 200000, bottom: -100000, top: 100000 });
        calculator.setExpressions(Array(
            <!-- insert here -->
        ));
      </script>
    "#;

const MARKER: &str = "<!-- insert here -->";

/// What to draw on top of the bare checkpoint map.
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    /// Checkpoints to highlight as ghost checkpoints.
    pub ghosts: Vec<usize>,
    /// Overlay the entry/exit regions of multi-way branches.
    pub split_paths: bool,
    /// Clip ghost regions to a window instead of drawing them
    /// unbounded.
    pub bounds: Option<Bounds>,
}

fn expression(latex: &str, color: &str, label: Option<&str>) -> String {
    let mut s = format!("{{ latex: '{latex}'");
    if !color.is_empty() {
        s.push_str(&format!(", color: '{color}'"));
    }
    if let Some(label) = label {
        s.push_str(&format!(
            ", label: '{label}', pointSize: 5, pointOpacity: 0.5, dragMode: Desmos.DragModes.NONE"
        ));
    }
    s.push_str(" }");
    s
}

/// Render the checkpoint map of a course as a Desmos HTML page.
pub fn render(kmp: &Kmp, opts: &RenderOptions) -> String {
    let ckpt = kmp.checkpoints();
    let n = ckpt.len();
    let (prevs, nexts) = neighbors(kmp);
    let mut script: Vec<String> = Vec::new();

    // Symbolic names and derived latex shared by every expression. The
    // s0/s1 fractions are the components of each line's unit normal,
    // spelled out so Desmos recomputes them when endpoints are dragged.
    let mut a_: Vec<String> = Vec::with_capacity(n);
    let mut b_: Vec<String> = Vec::with_capacity(n);
    let mut c_: Vec<String> = Vec::with_capacity(n);
    let mut d_: Vec<String> = Vec::with_capacity(n);
    let mut s1: Vec<String> = Vec::with_capacity(n);
    let mut s0: Vec<String> = Vec::with_capacity(n);
    let mut vneg: Vec<String> = Vec::with_capacity(n);
    for i in 0..n {
        a_.push(format!("a_{{{i}}}"));
        b_.push(format!("b_{{{i}}}"));
        c_.push(format!("c_{{{i}}}"));
        d_.push(format!("d_{{{i}}}"));
        s1.push(format!(
            r"\\frac{{({a}-{c})}}{{(({a}-{c})^{{2}}\\ +\\ ({d}-{b})^{{2}})^{{0.5}}}}",
            a = a_[i],
            b = b_[i],
            c = c_[i],
            d = d_[i],
        ));
        s0.push(format!(
            r"\\frac{{({d}-{b})}}{{(({a}-{c})^{{2}}\\ +\\ ({d}-{b})^{{2}})^{{0.5}}}}",
            a = a_[i],
            b = b_[i],
            c = c_[i],
            d = d_[i],
        ));
        vneg.push(format!(
            "{}(x-{})+{}(y-{})",
            s0[i], c_[i], s1[i], d_[i]
        ));
    }

    for i in 0..n {
        let color = if opts.ghosts.contains(&i) {
            RED
        } else if ckpt[i].kind == 255 {
            BLUE
        } else if ckpt[i].kind == 0 {
            GREEN
        } else {
            PURPLE
        };

        // Coordinates. The stored z axis is negated so the map matches
        // the in-game overhead view.
        script.push(expression(&format!("{}={}", a_[i], ckpt[i].p1[0]), "", None));
        script.push(expression(&format!("{}={}", b_[i], -ckpt[i].p1[1]), "", None));
        script.push(expression(&format!("{}={}", c_[i], ckpt[i].p2[0]), "", None));
        script.push(expression(&format!("{}={}", d_[i], -ckpt[i].p2[1]), "", None));

        // Endpoints, labeled midpoint, and the checkpoint line itself.
        script.push(expression(&format!("({}, {})", a_[i], b_[i]), color, None));
        script.push(expression(&format!("({}, {})", c_[i], d_[i]), color, None));
        script.push(expression(
            &format!("(0.5({}+{}),0.5({}+{}))", a_[i], c_[i], b_[i], d_[i]),
            color,
            Some(&i.to_string()),
        ));
        script.push(expression(
            &format!(
                "((1-t){}+t{},(1-t){}+t{})",
                a_[i], c_[i], b_[i], d_[i]
            ),
            color,
            None,
        ));

        // Region shading never uses the ghost highlight.
        let color = if ckpt[i].kind == 255 {
            BLUE
        } else if ckpt[i].kind == 0 {
            GREEN
        } else {
            PURPLE
        };

        for &nx in &nexts[i] {
            let vborder1 = format!(
                "-({}-{})(x-{})+({}-{})(y-{})",
                b_[nx], b_[i], a_[nx], a_[nx], a_[i], b_[nx]
            );
            let vborder2 = format!(
                "(({}-{})(x-{})-({}-{})(y-{}))",
                d_[nx], d_[i], c_[i], c_[nx], c_[i], d_[i]
            );

            // Quadrilateral between this checkpoint and the next: the
            // signed area term B is positive only between the borders.
            script.push(expression(
                &format!(
                    r"B_{{{i}t{nx}}}=({vborder1}) * {vborder2} + \\left|{vborder1}\\right| * -{vborder2}"
                ),
                "",
                None,
            ));
            script.push(expression(
                &format!(
                    r"F_{{{i}t{nx}}}=\\frac{{{v}}}{{{v} - ({s0n}(x-{an})+{s1n}(y-{bn}))}}",
                    v = vneg[i],
                    s0n = s0[nx],
                    s1n = s1[nx],
                    an = a_[nx],
                    bn = b_[nx],
                ),
                "",
                None,
            ));
            script.push(expression(
                &format!(
                    r"B_{{{i}t{nx}}} > 0 \\left\\{{R_{{{nx}t{i}}} > 0\\right\\}} \\left\\{{F_{{{i}t{nx}}} > 0\\right\\}}"
                ),
                color,
                None,
            ));

            if opts.split_paths && nexts[i].len() > 1 && ckpt[i].kind == 255 {
                script.push(expression(
                    &format!(
                        r"B_{{{i}t{nx}}} > 0 \\left\\{{B_{{{nx}t{after}}} > 0\\right\\}} \\left\\{{{v} > 0\\right\\}}",
                        after = nx + 1,
                        v = vneg[i],
                    ),
                    ORANGE,
                    None,
                ));
            }
        }

        for &pv in &prevs[i] {
            script.push(expression(
                &format!(
                    r"R_{{{i}t{pv}}}=\\frac{{{v}}}{{{v} - ({s0p}(x-{ap})+{s1p}(y-{bp}))}}",
                    v = vneg[i],
                    s0p = s0[pv],
                    s1p = s1[pv],
                    ap = a_[pv],
                    bp = b_[pv],
                ),
                "",
                None,
            ));

            if opts.split_paths && prevs[i].len() > 1 && ckpt[i].kind == 255 {
                script.push(expression(
                    &format!(
                        r"B_{{{pv}t{i}}} > 0 \\left\\{{B_{{{i}t{after}}} > 0\\right\\}} \\left\\{{{v} < 0\\right\\}}",
                        after = i + 1,
                        v = vneg[i],
                    ),
                    ORANGE,
                    None,
                ));
            }
        }

        // Ghost trigger regions, one per neighbor pair.
        for &pv in &prevs[i] {
            for &nx in &nexts[i] {
                let mut area = format!(
                    r"B_{{{pv}t{i}}} > 0 \\left\\{{B_{{{i}t{nx}}} > 0\\right\\}}\\left\\{{R_{{{i}t{pv}}} < 0\\right\\}} \\left\\{{F_{{{i}t{nx}}} < 0\\right\\}}"
                );
                if let Some(bounds) = opts.bounds {
                    area.push_str(&format!(
                        r"\\left\\{{{min}<x<{max}\\right\\}}\\left\\{{{min}<y<{max}\\right\\}}",
                        min = bounds.min,
                        max = bounds.max,
                    ));
                }
                script.push(expression(&area, RED, None));
            }
        }
    }

    TEMPLATE.replacen(MARKER, &script.join(",\n"), 1)
}
