use genoscale_core::resolution::{ChannelDef, MemberView, ScaleResolutionMember};
use genoscale_core::{
    Channel, ContigSize, CoordinateSpace, DataType, DomainSpec, EngineConfig, GenomeStore,
    LocusBound, ScaleResolution,
};
use genoscale_render::{
    DrawPlanner, DrawRange, GeometryBuilder, Precision, RectDatum, RectMark,
};
use std::rc::Rc;
use std::sync::Arc;

struct Track;

impl MemberView for Track {
    fn name(&self) -> &str {
        "genes"
    }
}

fn resolution() -> (ScaleResolution, Rc<Track>) {
    let mut store = GenomeStore::new();
    store.add(CoordinateSpace::from_sizes(
        "toy",
        (1..=10).map(|i| ContigSize::new(format!("chr{}", i), 1_000_000)),
    ));
    let track = Rc::new(Track);
    let mut resolution = ScaleResolution::new(Channel::X).with_genomes(Arc::new(store));
    resolution
        .register_member(ScaleResolutionMember::new(
            &track,
            Channel::X,
            ChannelDef::field("start", DataType::Locus),
        ))
        .unwrap();
    (resolution, track)
}

/// One 1 kb feature every 10 kb across the genome
fn features() -> Vec<RectDatum> {
    (0..1000)
        .map(|i| {
            let x = i as f64 * 10_000.0;
            RectDatum {
                x,
                x2: x + 1000.0,
                y: 0.0,
                y2: 1.0,
            }
        })
        .collect()
}

#[test]
fn zooming_narrows_the_draw_range() {
    let (mut resolution, _track) = resolution();
    let domain = resolution.domain().unwrap();
    let scale_type = resolution.scale().unwrap().scale_type();

    let genome_extent = domain.as_interval().unwrap();
    let mark = RectMark::new(Precision::for_scale(scale_type, genome_extent));
    let mut builder = GeometryBuilder::new(mark, &EngineConfig::default());
    builder.add_batch(None, &features()).unwrap();
    let batch = builder.finish();
    let entry = batch.range(&None).unwrap();
    assert!(entry.x_index.is_available());

    let planner = DrawPlanner::for_scale(resolution.current_scale());
    let whole = planner.plan(entry, &domain).unwrap();
    assert_eq!(whole, DrawRange { offset: 0, count: 6000 });

    let target = DomainSpec::Loci(vec![LocusBound::at("chr3", 0), LocusBound::at("chr3", 50_000)]);
    resolution.zoom_to(&target, 0.0).unwrap();
    let zoomed = planner.plan(entry, &resolution.domain().unwrap()).unwrap();

    // chr3:0-50,000 holds features 200..205; the index may add neighbours
    let first_visible = 200 * 6;
    let last_visible = 205 * 6;
    assert!(zoomed.offset <= first_visible);
    assert!(zoomed.offset + zoomed.count >= last_visible);
    assert!(zoomed.count < whole.count / 4);
}

#[test]
fn faceted_batches_are_planned_independently() {
    let (mut resolution, _track) = resolution();
    let planner = DrawPlanner::for_scale(Some(resolution.scale().unwrap()));

    let mut builder = GeometryBuilder::new(RectMark::new(Precision::Split), &EngineConfig::default());
    let all = features();
    builder.add_batch(Some("sample-1".into()), &all[..500]).unwrap();
    builder.add_batch(Some("sample-2".into()), &all[500..]).unwrap();
    let batch = builder.finish();

    let domain = resolution.domain().unwrap();
    let first = planner.plan(batch.entry_for(Some("sample-1")).unwrap(), &domain).unwrap();
    let second = planner.plan(batch.entry_for(Some("sample-2")).unwrap(), &domain).unwrap();
    assert_eq!(first, DrawRange { offset: 0, count: 3000 });
    assert_eq!(second, DrawRange { offset: 3000, count: 3000 });
}
