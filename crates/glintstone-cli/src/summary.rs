use console::Style;
use glintstone_core::transform::FitBounds;
use glintstone_core::{LoadedImageInfo, Phase, ViewRect, ViewerState, ZoomboxEvent};

struct Styles {
    title: Style,
    header: Style,
    label: Style,
    value: Style,
    event: Style,
    error: Style,
    path: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            header: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            event: Style::new().green(),
            error: Style::new().red().bold(),
            path: Style::new().underlined(),
        }
    }
}

fn title(s: &Styles, text: &str) {
    println!();
    println!("  {}", s.title.apply_to(text));
    println!("  {}", s.title.apply_to("\u{2550}".repeat(text.chars().count())));
    println!();
}

pub fn print_image_summary(info: &LoadedImageInfo, viewport: (f64, f64), bounds: Option<FitBounds>) {
    let s = Styles::new();
    title(&s, "Glintstone Image");

    println!("  {:<14}{}", s.label.apply_to("Source"), s.path.apply_to(&info.source));
    println!(
        "  {:<14}{}",
        s.label.apply_to("Natural size"),
        s.value.apply_to(format!("{}x{}", info.width, info.height))
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Viewport"),
        s.value.apply_to(format!("{}x{}", viewport.0, viewport.1))
    );

    match bounds {
        Some(b) => {
            println!(
                "  {:<14}{}",
                s.label.apply_to("Contain"),
                s.value.apply_to(format!("{:.4} ({:.1}%)", b.contain, b.contain * 100.0))
            );
            println!(
                "  {:<14}{}",
                s.label.apply_to("Cover"),
                s.value.apply_to(format!("{:.4} ({:.1}%)", b.cover, b.cover * 100.0))
            );
        }
        None => println!(
            "  {:<14}{}",
            s.label.apply_to("Fit"),
            s.error.apply_to("viewport is degenerate")
        ),
    }
    println!();
}

pub fn print_state(phase: Phase, state: &ViewerState, indicator: &ViewRect) {
    let s = Styles::new();
    title(&s, "Viewer State");

    let rows = [
        ("Phase", phase.to_string()),
        ("Natural", format!("{}x{}", state.natural_width, state.natural_height)),
        ("Scale", format!("{:.4} ({:.1}%)", state.scale, state.scale * 100.0)),
        ("Pan", format!("({:.2}, {:.2})", state.pan_x, state.pan_y)),
        ("Cover", format!("{:.4}", state.cover_scale)),
        ("Range", format!("{:.4} .. {:.4}", state.min_scale, state.max_scale)),
    ];
    for (label, value) in rows {
        println!("  {:<14}{}", s.label.apply_to(label), s.value.apply_to(value));
    }

    println!();
    println!("  {}", s.header.apply_to("Minimap Indicator"));
    println!(
        "    {:<12}{}",
        s.label.apply_to("Origin"),
        s.value.apply_to(format!("{:.1}%, {:.1}%", indicator.left, indicator.top))
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Size"),
        s.value.apply_to(format!("{:.1}% x {:.1}%", indicator.width, indicator.height))
    );
    println!();
}

pub fn print_step(index: usize, description: &str, events: &[ZoomboxEvent]) {
    let s = Styles::new();
    println!(
        "  {:>3}  {}",
        s.label.apply_to(index),
        s.value.apply_to(description)
    );
    for event in events {
        let style = match event {
            ZoomboxEvent::ImageError(_) => &s.error,
            _ => &s.event,
        };
        println!("         {}", style.apply_to(event));
    }
}
