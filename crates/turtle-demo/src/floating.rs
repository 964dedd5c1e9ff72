use turtle_engine::{App, Color, Config, Context, ImageId, Key};

const FLOAT_RANGE: f32 = 10.0;
const FLOAT_SPEED: f32 = 50.0;
const SPAWN_INTERVAL: f32 = 1.0;
const HEARTH_SPEED: f32 = 100.0;

/// A sprite scrolling right to left at a random height and angle.
struct Hearth {
    x: f32,
    y: f32,
    angle: f32,
}

/// A turtle bobbing in the middle of the screen while hearts drift past.
#[derive(Default)]
pub struct FloatingTurtle {
    turtle: Option<ImageId>,
    hearth: Option<ImageId>,
    base_y: f32,
    y: f32,
    rising: bool,
    spawn_timer: f32,
    hearths: Vec<Hearth>,
}

impl App for FloatingTurtle {
    fn configure(&mut self) -> Config {
        Config::default()
            .with_title("Turtle 0.1.2 (LÖVEly Turtles)")
            .with_icon("assets/icon.png")
    }

    fn load(&mut self, ctx: &mut Context<'_>, _args: &[String]) {
        self.turtle = ctx.graphics.new_image("assets/turtle.png");
        self.hearth = ctx.graphics.new_image("assets/hearth.png");

        if let Some(h) = self.turtle.and_then(|t| ctx.graphics.image_height(t)) {
            self.base_y = ctx.graphics.height() as f32 / 2.0 - h as f32 / 4.0;
            self.y = self.base_y;
        }
        self.rising = true;

        ctx.graphics.set_background_color(Color::from_srgb_u8(254, 171, 243, 255));
    }

    fn update(&mut self, ctx: &mut Context<'_>, dt: f32) {
        self.y += if self.rising { -FLOAT_SPEED * dt } else { FLOAT_SPEED * dt };
        if self.y < self.base_y - FLOAT_RANGE {
            self.rising = false;
        } else if self.y > self.base_y + FLOAT_RANGE {
            self.rising = true;
        }

        self.spawn_timer += dt;
        if self.spawn_timer > SPAWN_INTERVAL {
            self.spawn_timer = 0.0;
            let height = ctx.graphics.height().max(1) as f32;
            self.hearths.push(Hearth {
                x: ctx.graphics.width() as f32 + 200.0,
                y: ctx.random.random() as f32 * height,
                angle: ctx.random.random() as f32 * std::f32::consts::TAU,
            });
        }

        for hearth in &mut self.hearths {
            hearth.x -= HEARTH_SPEED * dt;
        }
        self.hearths.retain(|h| h.x >= -200.0);
    }

    fn draw(&mut self, ctx: &mut Context<'_>) {
        if let Some(image) = self.hearth {
            for h in &self.hearths {
                ctx.graphics.draw_ex(image, h.x.trunc(), h.y.trunc(), h.angle, 0.5, 0.5);
            }
        }

        if let Some(image) = self.turtle {
            let w = ctx.graphics.image_width(image).unwrap_or(0) as f32;
            let x = ctx.graphics.width() as f32 / 2.0 - w / 4.0;
            ctx.graphics.draw_ex(image, x, self.y.trunc(), 0.0, 0.5, 0.5);
        }
    }

    fn key_pressed(&mut self, ctx: &mut Context<'_>, key: Key, _is_repeat: bool) {
        if key == Key::Escape {
            ctx.event.quit();
        }
    }
}
