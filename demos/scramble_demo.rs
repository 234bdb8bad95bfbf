use glyph_scramble::prelude::*;

const FPS: f64 = 60.0;

fn main() {
    env_logger::init();

    for variant in Variant::ALL {
        run_variant(variant);
    }
}

/// Play one variant to completion and print every sixth frame
fn run_variant(variant: Variant) {
    let element = TextElement::new("Interaction ", Color::rgb(0.9, 0.9, 0.95))
        .with_run("demos", Color::from_hex(0x66ccff));
    let mut animator = match ScrambleAnimator::new(element, variant, ScrambleOptions::default()) {
        Ok(animator) => animator,
        Err(err) => {
            log::error!("could not build animator: {}", err);
            return;
        }
    };
    let mut timeline = Timeline::new();

    println!("== {} ==", variant);
    animator.animate(&mut timeline);

    let mut frame = 0u32;
    while !timeline.is_idle() {
        timeline.advance(1.0 / FPS);
        if frame % 6 == 0 {
            println!("{:>6.3}s  {}", timeline.now(), describe(&animator));
        }
        frame += 1;
    }
    println!("{:>6.3}s  {}", timeline.now(), describe(&animator));

    animator.animate_out(&mut timeline);
    while !timeline.is_idle() {
        timeline.advance(1.0 / FPS);
    }
    animator.destroy(&mut timeline);
    println!();
}

fn describe(animator: &ScrambleAnimator) -> String {
    let element = animator.element();
    let caret: String = animator
        .characters()
        .iter()
        .map(|handle| if handle.cursor_visible() { '^' } else { ' ' })
        .collect();
    match animator.variant() {
        Variant::Cursor => format!("{}  [{}]", element.text_content(), caret),
        Variant::Background | Variant::Blur => format!(
            "{}  scale={:.2}",
            element.text_content(),
            element.channel(Channel::RevealScale)
        ),
        Variant::Glitch => format!(
            "{}  intensity={:.2} x={:+.2} skew={:+.2}",
            element.text_content(),
            element.channel(Channel::GlitchIntensity),
            element.channel(Channel::GlitchOffsetX),
            element.channel(Channel::GlitchSkew)
        ),
        Variant::Color => {
            let colors: Vec<String> = animator
                .characters()
                .iter()
                .map(|handle| handle.computed_color().to_string())
                .collect();
            format!("{}  {}", element.text_content(), colors.join(" "))
        }
    }
}
