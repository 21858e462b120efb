use tessera_engine::core::{App, Flow, FrameCtx};
use tessera_engine::input::Key;
use tessera_engine::render::flat::DrawList;
use tessera_engine::render::{FlatRenderer, SurfaceRenderer};

use crate::demos::{Demo, DemoCtx, DemoKind};

/// Hosts the active demo; number keys pick a demo and the arrows cycle.
pub struct Studio {
    kind: DemoKind,
    /// Built lazily on the first frame after a switch; needs the device.
    demo: Option<Box<dyn Demo>>,

    surfaces: SurfaceRenderer,
    flat: FlatRenderer,
    draw_list: DrawList,
}

impl Studio {
    pub fn new(initial: DemoKind) -> Self {
        Self {
            kind: initial,
            demo: None,
            surfaces: SurfaceRenderer::new(),
            flat: FlatRenderer::new(),
            draw_list: DrawList::new(),
        }
    }

    fn requested_switch(&self, ctx: &FrameCtx<'_, '_>) -> Option<DemoKind> {
        let keys = &ctx.input_frame.keys_pressed;
        if let Some(kind) = keys.iter().filter_map(|k| k.digit()).find_map(DemoKind::from_digit) {
            return Some(kind);
        }
        if keys.contains(&Key::ArrowRight) {
            return Some(self.kind.next());
        }
        if keys.contains(&Key::ArrowLeft) {
            return Some(self.kind.prev());
        }
        None
    }
}

impl App for Studio {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> Flow {
        if ctx.input_frame.key_pressed(Key::Escape) {
            return Flow::Exit;
        }

        if let Some(kind) = self.requested_switch(ctx).filter(|&k| k != self.kind) {
            log::info!("switching to {}", kind.name());
            self.kind = kind;
            self.demo = None;
            ctx.runtime.set_title(kind.title());
        }

        if self.demo.is_none() {
            match self.kind.build(ctx.gpu.device(), ctx.gpu.queue()) {
                Ok(demo) => self.demo = Some(demo),
                Err(e) => {
                    log::error!("failed to build demo {}: {e:#}", self.kind.name());
                    return Flow::Exit;
                }
            }
        }
        let Some(demo) = self.demo.as_mut() else {
            return Flow::Continue;
        };

        let dcx = DemoCtx {
            device: ctx.gpu.device(),
            queue: ctx.gpu.queue(),
            input: ctx.input,
            input_frame: ctx.input_frame,
            time: ctx.time,
            viewport: ctx.window.viewport(),
        };
        if let Err(e) = demo.update(&dcx) {
            log::error!("demo {} failed: {e:#}", self.kind.name());
            return Flow::Exit;
        }

        self.draw_list.clear();
        demo.draw_flat(&mut self.draw_list);

        let (surfaces, flat, draw_list) = (&mut self.surfaces, &mut self.flat, &mut self.draw_list);
        let demo: &dyn Demo = &**demo;

        ctx.render(demo.clear_color(), |rctx, target| {
            if let Some(scene) = demo.scene() {
                surfaces.render(rctx, target, scene);
            }
            if !draw_list.is_empty() {
                flat.render(rctx, target, draw_list);
            }
        })
    }
}
