use turtle_engine::physics::BodyType;
use turtle_engine::{App, Config, Context, DrawMode, Key, MouseButton, Vec2, World};

/// Boxes rain from the cursor into a walled pit while the left button is held.
pub struct Sandbox {
    world: World,
    /// Cursor marker rotation, radians.
    spin: f32,
}

impl Default for Sandbox {
    fn default() -> Self {
        Self { world: World::new(Vec2::new(0.0, 10.0)), spin: 0.0 }
    }
}

impl Sandbox {
    fn add_static(&mut self, ctx: &Context<'_>, x: f32, y: f32, w: f32, h: f32) {
        let result = self
            .world
            .new_rectangle_collider(x, y, w, h)
            .and_then(|handle| self.world.set_body_type(handle, BodyType::Static));
        if let Err(e) = result {
            ctx.raise_error(e.to_string());
        }
    }
}

impl App for Sandbox {
    fn configure(&mut self) -> Config {
        Config::default()
            .with_title("Turtle sandbox")
            .with_vsync(false)
    }

    fn load(&mut self, ctx: &mut Context<'_>, _args: &[String]) {
        self.add_static(ctx, 50.0, 550.0, 700.0, 20.0);
        self.add_static(ctx, 50.0, 50.0, 20.0, 500.0);
        self.add_static(ctx, 730.0, 50.0, 20.0, 500.0);
    }

    fn update(&mut self, ctx: &mut Context<'_>, dt: f32) {
        self.spin = (self.spin + dt) % std::f32::consts::TAU;
        if let Err(e) = self.world.step(dt) {
            ctx.raise_error(e.to_string());
            return;
        }

        if ctx.mouse.is_down(MouseButton::Left) {
            let (x, y) = (ctx.mouse.x(), ctx.mouse.y());
            if let Err(e) = self.world.new_rectangle_collider(x, y, 20.0, 20.0) {
                ctx.raise_error(e.to_string());
            }
        }
    }

    fn draw(&mut self, ctx: &mut Context<'_>) {
        ctx.graphics.print(format!("FPS: {}", ctx.timer.fps()), 10.0, 10.0);
        ctx.graphics
            .print(format!("Body Count: {}", self.world.body_count()), 10.0, 50.0);

        self.world.render(ctx.graphics);

        let (x, y) = (ctx.mouse.x(), ctx.mouse.y());
        ctx.graphics.polygon(DrawMode::Line, x, y, 6, 14.0, self.spin);
    }

    fn key_pressed(&mut self, ctx: &mut Context<'_>, key: Key, _is_repeat: bool) {
        match key {
            Key::Escape => ctx.event.quit(),
            Key::R => {
                self.world.clear();
                self.load(ctx, &[]);
            }
            _ => {}
        }
    }
}
