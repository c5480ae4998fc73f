use bspack::{BspPacker, Sizable};

#[derive(Debug)]
struct Sprite {
    name: &'static str,
    size: (f64, f64),
}

impl Sizable for Sprite {
    fn width(&self) -> f64 {
        self.size.0
    }

    fn height(&self) -> f64 {
        self.size.1
    }
}

fn sprite(name: &'static str, width: f64, height: f64) -> Sprite {
    Sprite {
        name,
        size: (width, height),
    }
}

fn describe_layout(sprites: Vec<Sprite>, size: (f64, f64), margin: f64) -> Vec<String> {
    let _ = env_logger::try_init();

    BspPacker::new(size)
        .margin(margin)
        .pack(sprites)
        .unwrap_or_else(|err| panic!("{} ({})", err, err.item().name))
        .into_iter()
        .map(|placement| {
            let (sprite, rect) = placement.into_inner();
            format!(
                "{} at ({}, {}) {}x{}",
                sprite.name, rect.x, rect.y, rect.width, rect.height
            )
        })
        .collect()
}

#[test]
fn mixed_interface_sprites() {
    let sprites = vec![
        sprite("button", 24.0, 10.0),
        sprite("icon", 12.0, 12.0),
        sprite("panel", 40.0, 30.0),
        sprite("badge", 12.0, 12.0),
        sprite("divider", 30.0, 2.0),
        sprite("cursor", 8.0, 14.0),
    ];

    insta::assert_debug_snapshot!(
        "mixed_interface_sprites",
        describe_layout(sprites, (64.0, 64.0), 2.0)
    );
}

#[test]
fn wide_divider_overflows() {
    let sprites = vec![
        sprite("panel", 40.0, 30.0),
        sprite("button", 24.0, 10.0),
        sprite("divider", 60.0, 2.0),
    ];

    let err = BspPacker::new((64.0, 64.0))
        .margin(2.0)
        .pack(sprites)
        .unwrap_err();

    assert_eq!(err.item().name, "divider");
}
