//! Property-based checks of the size identities and floors.

use quickcheck::TestResult;
use quickcheck_macros::quickcheck;
use strut_css::layout::{GeneratedLayout, MeasuredBox};
use strut_css::style::StyleCache;
use strut_css::{ContentMeasurer, DocumentStyles, generate_for};
use strut_dom::{NodeId, parse_html};

const EPSILON: f64 = 1e-6;

struct Natural(MeasuredBox);

impl ContentMeasurer for Natural {
    fn measure_node(&self, _styles: &StyleCache<'_>, _node: NodeId) -> MeasuredBox {
        self.0
    }

    fn measure_text(&self, _styles: &StyleCache<'_>, _node: NodeId, _word: &str) -> MeasuredBox {
        self.0
    }
}

fn generate(body: &str, natural: MeasuredBox) -> GeneratedLayout {
    let dom = parse_html(&format!("<body>{body}</body>")).unwrap();
    let root = dom.document_element().unwrap();
    let styles = DocumentStyles::from_document(&dom);
    generate_for(&dom, root, 1000.0, 1000.0, &styles, &Natural(natural)).unwrap()
}

fn target(layout: &GeneratedLayout) -> &strut_css::ResolvedBox {
    layout
        .boxes
        .iter()
        .find(|b| b.label.as_deref() == Some("div"))
        .unwrap()
}

#[quickcheck]
fn explicit_width_is_exact(width: u16, height: u16) -> bool {
    let (width, height) = (f64::from(width % 500), f64::from(height % 500));
    let layout = generate(
        &format!(r#"<div style="position: absolute; width: {width}px; height: {height}px"></div>"#),
        MeasuredBox::sized(37.0, 11.0),
    );
    let div = target(&layout);
    let reference = div.reference.unwrap();

    (div.width - width).abs() < EPSILON
        && (div.height - height).abs() < EPSILON
        && (reference.content.width() - width).abs() < EPSILON
        && (reference.border.width() - div.width).abs() < EPSILON
        && (reference.border.height() - div.height).abs() < EPSILON
}

#[quickcheck]
fn padding_comes_out_of_the_natural_border_box(natural: u16, padding: u8) -> bool {
    let natural = f64::from(natural % 500);
    let padding = f64::from(padding % 20);
    let layout = generate(
        &format!(r#"<div style="position: absolute; padding: {padding}px"></div>"#),
        MeasuredBox::sized(natural, natural),
    );
    let div = target(&layout);
    let reference = div.reference.unwrap();

    (div.width - natural).abs() < EPSILON
        && (reference.border.width() - div.width).abs() < EPSILON
        && (reference.content.width() - (natural - 2.0 * padding)).abs() < EPSILON
        && (reference.padding.left - (reference.content.left - padding)).abs() < EPSILON
}

#[quickcheck]
fn auto_width_takes_natural_size(natural_width: u16, natural_height: u16) -> bool {
    let natural = MeasuredBox::sized(
        f64::from(natural_width % 800),
        f64::from(natural_height % 800),
    );
    let layout = generate(r#"<div style="position: absolute"></div>"#, natural);
    let div = target(&layout);
    (div.width - natural.width()).abs() < EPSILON
        && (div.height - natural.height()).abs() < EPSILON
}

#[quickcheck]
fn min_size_is_a_floor(natural: u16, min: u16) -> TestResult {
    let natural = f64::from(natural % 400);
    let min = f64::from(min % 400);
    if (natural - min).abs() < 1.0 {
        return TestResult::discard();
    }
    let layout = generate(
        &format!(r#"<div style="position: absolute; min-width: {min}px; min-height: {min}px"></div>"#),
        MeasuredBox::sized(natural, natural),
    );
    let div = target(&layout);
    let expected = natural.max(min);
    TestResult::from_bool(
        div.width >= min - EPSILON
            && div.height >= min - EPSILON
            && (div.width - expected).abs() < EPSILON
            && (div.height - expected).abs() < EPSILON,
    )
}

#[quickcheck]
fn relative_offsets_shift_the_actual_margin_edge(top: u8, left: u8) -> bool {
    let (top, left) = (f64::from(top % 50), f64::from(left % 50));
    let layout = generate(
        &format!(
            r#"<div style="position: relative; top: {top}px; left: {left}px; height: 50px"></div>"#
        ),
        MeasuredBox::sized(10.0, 10.0),
    );
    let div = target(&layout);
    let reference = div.reference.unwrap().margin;
    let actual = div.actual.margin;
    (actual.top - (reference.top + top)).abs() < EPSILON
        && (actual.left - (reference.left + left)).abs() < EPSILON
        && (actual.right - reference.right).abs() < EPSILON
        && (actual.bottom - reference.bottom).abs() < EPSILON
}
