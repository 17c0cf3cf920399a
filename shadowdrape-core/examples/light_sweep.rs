//! Sweep the light around a synthetic scene and write one PNG per angle.
//!
//! `cargo run -p shadowdrape-core --example light_sweep`

use shadowdrape::{
    DepthBuffer, LightParams, RenderController, RenderRequest, RgbaImage, SceneTransform,
};

fn background(w: u32, h: u32) -> RgbaImage {
    let mut data = Vec::with_capacity((w * h * 4) as usize);
    for y in 0..h {
        let t = y as f32 / h as f32;
        let sky = [(150.0 + 80.0 * t) as u8, (190.0 + 40.0 * t) as u8, 235, 255];
        let ground = [(120.0 + 60.0 * t) as u8, (150.0 + 40.0 * t) as u8, 90, 255];
        let px = if t < 0.45 { sky } else { ground };
        for _ in 0..w {
            data.extend_from_slice(&px);
        }
    }
    RgbaImage::new(w, h, data).expect("background size")
}

/// A standing capsule, opaque inside.
fn capsule(w: u32, h: u32) -> RgbaImage {
    let r = w as f32 / 2.0;
    let mut straight = Vec::with_capacity((w * h * 4) as usize);
    for y in 0..h {
        for x in 0..w {
            let cx = x as f32 + 0.5 - r;
            let cy = (y as f32 + 0.5).clamp(r, h as f32 - r);
            let dy = y as f32 + 0.5 - cy;
            let inside = cx * cx + dy * dy <= r * r;
            straight.extend_from_slice(&[200, 80, 60, if inside { 255 } else { 0 }]);
        }
    }
    RgbaImage::from_straight_rgba8(w, h, straight).expect("cutout size")
}

/// Far at the horizon, near at the bottom, with a low mound on the right.
fn depth(w: u32, h: u32) -> DepthBuffer {
    let mut data = Vec::with_capacity((w * h) as usize);
    for y in 0..h {
        for x in 0..w {
            let base = 255.0 * y as f32 / h as f32;
            let dx = x as f32 - w as f32 * 0.75;
            let dy = y as f32 - h as f32 * 0.8;
            let mound = 60.0 * (-(dx * dx + dy * dy) / 2000.0).exp();
            data.push((base + mound).min(255.0) as u8);
        }
    }
    DepthBuffer::new(w, h, data).expect("depth size")
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let (w, h) = (320, 200);
    let out_dir = std::path::Path::new("target").join("light_sweep");
    std::fs::create_dir_all(&out_dir)?;

    let mut controller = RenderController::new(RenderRequest {
        transform: SceneTransform::new(0.45, 0.8, 1.0),
        ..RenderRequest::default()
    });
    controller.background_mut().replace(background(w, h));
    controller.cutout_mut().replace(capsule(24, 64));
    controller.depth_mut().replace(depth(w, h));

    for step in 0..8 {
        let angle = f64::from(step) * 45.0;
        controller.set_light(LightParams {
            angle,
            elevation: 35.0,
        });
        let Some(report) = controller.take_render() else {
            continue;
        };
        let frame = controller.frame();
        let path = out_dir.join(format!("angle_{angle:03}.png"));
        image::save_buffer_with_format(
            &path,
            &frame.to_straight_rgba8(),
            frame.width(),
            frame.height(),
            image::ColorType::Rgba8,
            image::ImageFormat::Png,
        )?;
        println!(
            "{} warp={:?} coverage={}",
            path.display(),
            report.warp,
            report.coverage
        );
    }
    Ok(())
}
