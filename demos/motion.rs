/// Move arrows along a pentagon motion path and dump the recorded frames as JSON
use polypath::*;
use std::io::Write;
use tracing_subscriber::{EnvFilter, fmt::format::FmtSpan};

type Error = Box<dyn std::error::Error>;

const SIZE: usize = 200;
const FRAMES: usize = 25;

fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_span_events(FmtSpan::CLOSE)
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let center = SIZE as Scalar / 2.0;
    let motion = Path::regular_polygon((center, center), 5, 80.0)?;
    let mut arrow = Path::regular_polygon((center, center), 3, 4.0)?;
    arrow.scale(1.0, 2.0, None).rotate(1.5 * PI, None);
    let orbit: Path = "M60,100 a40,40 0 1 1 80,0 a40,40 0 1 1 -80,0".parse()?;

    let mut session = Session::new(SIZE, SIZE);
    let outline = DrawStyle::none().with_stroke(RGBA::gray(255));
    let fill = DrawStyle::none().with_fill("orange".parse::<RGBA>()?);
    let easing: Easing = "ease_in_out_sine".parse()?;
    let step = 1.0 / (FRAMES * FRAMES) as Scalar;
    for frame in 0..FRAMES {
        session.clear(None);
        motion.draw(&mut session, &outline);
        let offset = step * frame as Scalar;
        for t in linspace(offset, 1.0 - 1.0 / FRAMES as Scalar + offset, FRAMES) {
            let (point, angle) = motion.point_and_tangent_at(t)?;
            arrow.set_position(point);
            arrow.rotated(angle, None).draw(&mut session, &fill);
        }
        let progress = easing.apply(frame as Scalar / (FRAMES - 1) as Scalar)?;
        let (point, _) = orbit.point_and_tangent_at(progress)?;
        session.draw_circle(point, 3.0, &DrawStyle::default());
        let hue = map_range(progress, 0.0, 1.0, 0.0, 0.8);
        let marker = DrawStyle::none().with_stroke(RGBA::from_hsv(hue, 0.8, 1.0));
        session.draw_bbox(orbit.bounds(), &marker);
        session.append_frame();
    }
    tracing::debug!("[motion] orbit {:?}", orbit.bounds());

    let animation = session.finish();
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(animation.to_json()?.as_bytes())?;
    stdout.write_all(b"\n")?;
    Ok(())
}
