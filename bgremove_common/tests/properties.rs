use std::collections::{HashSet, VecDeque};

use bgremove_common::cluster::cluster;
use bgremove_common::region::{grow, VisitedMask};
use bgremove_common::{preview_with_report, process_with_report, Color, ProcessingOptions, Raster};
use proptest::prelude::*;

fn color() -> impl Strategy<Value = Color> {
    (any::<u8>(), any::<u8>(), any::<u8>()).prop_map(Color::from)
}

/// Small rasters over a few nearby tones so that fills actually spread.
fn raster() -> impl Strategy<Value = Raster> {
    (1u32..12, 1u32..12).prop_flat_map(|(w, h)| {
        prop::collection::vec(0u8..4, (w * h) as usize).prop_map(move |cells| {
            Raster::from_fn(w, h, |x, y| {
                let tone = cells[(y * w + x) as usize];
                Color::new(60 + tone * 20, 100, 200 - tone * 30)
            })
        })
    })
}

proptest! {
    #[test]
    fn cluster_of_one_is_itself(c in color(), t in 1u32..100) {
        prop_assert_eq!(cluster(&[c], t), vec![c]);
    }

    #[test]
    fn clusters_cover_samples_and_stay_apart(
        samples in prop::collection::vec(color(), 0..40),
        t in 1u32..120,
    ) {
        let clusters = cluster(&samples, t);
        prop_assert_eq!(clusters.is_empty(), samples.is_empty());
        if let Some(first) = samples.first() {
            prop_assert_eq!(clusters[0], *first);
        }
        for s in &samples {
            prop_assert!(clusters.iter().any(|c| c.distance(*s) < t || c == s));
        }
        for (i, a) in clusters.iter().enumerate() {
            for b in &clusters[i + 1..] {
                prop_assert!(a.distance(*b) >= t);
            }
        }
    }

    #[test]
    fn appending_clustered_color_keeps_count(
        samples in prop::collection::vec(color(), 1..30),
        pick in any::<prop::sample::Index>(),
    ) {
        let clusters = cluster(&samples, 15);
        let mut extended = samples.clone();
        extended.push(*pick.get(&clusters));
        prop_assert_eq!(cluster(&extended, 15).len(), clusters.len());
    }

    #[test]
    fn grown_region_is_bounded_connected_and_in_tolerance(
        raster in raster(),
        sx in 0u32..12,
        sy in 0u32..12,
        tolerance in 1u32..30,
    ) {
        let seed = (sx % raster.width(), sy % raster.height());
        let target = raster.color_at(seed.0, seed.1).unwrap();
        let mut visited = VisitedMask::for_raster(&raster);
        let mut marked = Vec::new();

        let n = grow(&raster, &mut visited, seed, target, tolerance as f32, |x, y| marked.push((x, y)));

        prop_assert_eq!(n, marked.len());
        let set: HashSet<(u32, u32)> = marked.iter().copied().collect();
        prop_assert_eq!(set.len(), marked.len(), "a pixel was marked twice");
        prop_assert!(set.contains(&seed));

        for &(x, y) in &set {
            prop_assert!(raster.contains(x, y));
            prop_assert!(visited.is_visited(x, y));
            let c = raster.color_at(x, y).unwrap();
            prop_assert!(c.distance(target) <= tolerance * 3);
        }

        // Every marked pixel is reachable from the seed through marked pixels.
        let mut reached = HashSet::from([seed]);
        let mut queue = VecDeque::from([seed]);
        while let Some((x, y)) = queue.pop_front() {
            let around = [
                (x.wrapping_sub(1), y),
                (x + 1, y),
                (x, y.wrapping_sub(1)),
                (x, y + 1),
            ];
            for p in around {
                if set.contains(&p) && reached.insert(p) {
                    queue.push_back(p);
                }
            }
        }
        prop_assert_eq!(reached, set);
    }

    #[test]
    fn output_keeps_dimensions_and_rgb(raster in raster(), tolerance in 5u32..=50) {
        let options = ProcessingOptions { tolerance, ..Default::default() };
        let (out, _) = process_with_report(&raster, &options).unwrap();

        prop_assert_eq!((out.width(), out.height()), (raster.width(), raster.height()));
        for (x, y, c) in raster.colors() {
            prop_assert_eq!(out.color_at(x, y), Some(c));
        }
    }

    #[test]
    fn preview_marks_exactly_the_removed_pixels(
        raster in raster(),
        tolerance in 5u32..=50,
        picks in prop::collection::vec(0u8..4, 0..3),
    ) {
        let mut options = ProcessingOptions { tolerance, ..Default::default() };
        for tone in picks {
            options.add_selected_color(Color::new(60 + tone * 20, 100, 200 - tone * 30));
        }

        let (removed, _) = process_with_report(&raster, &options).unwrap();
        let (preview, _) = preview_with_report(&raster, &options).unwrap();

        for (x, y, c) in raster.colors() {
            let was_removed = removed.alpha_at(x, y) == Some(0);
            let highlighted = preview.color_at(x, y) != Some(c);
            prop_assert_eq!(was_removed, highlighted, "pixel ({}, {})", x, y);
        }
    }
}
