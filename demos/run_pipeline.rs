use tapevision::pipeline::load_frame;
use tapevision::{PipelineConfig, TapeDetector};

fn main() -> anyhow::Result<()> {
    let path = std::env::args().nth(1).unwrap_or_else(|| "tape_pair.png".to_string());
    let frame = load_frame(&path)?;

    println!("Running tape detector on {}...\n", path);

    let detector = TapeDetector::new(PipelineConfig::default())?;
    println!("Mask pixels lit: {}", detector.mask(&frame).pixels().filter(|p| p[0] > 0).count());
    println!("Contours traced: {}", detector.raw_contours(&frame).len());
    println!("Contours kept:   {}", detector.filtered_contours(&frame).len());

    let detections = detector.detect(&frame)?;
    for (i, target) in detections.targets.iter().enumerate() {
        let center = target.center()?;
        println!(
            "  Tape {}: center=({}, {}), area={:.1}, angle={:.1}",
            i + 1,
            center.x,
            center.y,
            target.area()?,
            target.angle()
        );
    }

    for (i, group) in detections.groups()?.iter().enumerate() {
        println!(
            "  Group {}: center=({}, {}), frame {:?} -> {:?}",
            i + 1,
            group.center.x,
            group.center.y,
            (group.bounds.from.x, group.bounds.from.y),
            (group.bounds.to.x, group.bounds.to.y)
        );
    }

    // Demonstrate a looser configuration: drop the width limits
    let mut loose = PipelineConfig::default();
    loose.filter.width.min = 0.0;
    loose.filter.width.max = f64::MAX;
    let loose_count = TapeDetector::new(loose)?.detect(&frame)?.len();
    println!("\nWith no width limits: {} tapes", loose_count);

    Ok(())
}
