//! Integration tests for retint crates.
//!
//! End-to-end checks across core, LUT, I/O and engine: pipeline determinism,
//! cache behavior under concurrent callers, and the recolor scenarios.

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Barrier};
    use std::thread;

    use retint_core::{distance, Color, Palette, RgbaImage};
    use retint_engine::{
        palette_hash, ColorCorrectionBackend, CubeCache, RecolorConfig, Recolorer, StaticThemes,
    };
    use retint_lut::{
        interpolate, layout, nearest_color, nearest_neighbor_transform, LookupCube, RbfMapper,
    };
    use tempfile::tempdir;

    fn dracula() -> Palette {
        Palette::from_hex(&[
            "#282a36", "#44475a", "#f8f8f2", "#6272a4", "#8be9fd", "#50fa7b", "#ffb86c",
            "#ff79c6", "#bd93f9", "#ff5555", "#f1fa8c",
        ])
        .unwrap()
    }

    /// 64x64 image sweeping R along x, G along y, B diagonally, alpha varying.
    fn sweep() -> RgbaImage {
        let mut raw = Vec::with_capacity(64 * 64 * 4);
        for y in 0..64u32 {
            for x in 0..64u32 {
                raw.extend_from_slice(&[
                    (x * 4 + x / 16) as u8,
                    (y * 4 + y / 16) as u8,
                    ((x + y) * 2) as u8,
                    (255 - x) as u8,
                ]);
            }
        }
        RgbaImage::from_raw(64, 64, raw).unwrap()
    }

    fn png_bytes(image: &RgbaImage) -> Vec<u8> {
        let mut out = Vec::new();
        retint_io::png::encode(&mut out, image).unwrap();
        out
    }

    #[test]
    fn test_identity_cube_reproduces_image() {
        let img = sweep();
        for level in [2usize, 4, 8, 16] {
            let out = LookupCube::identity(level).unwrap().apply_image(&img);
            let bound = (256 / level) as i32;
            for ((o, oa), (i, ia)) in out.pixels().zip(img.pixels()) {
                assert_eq!(oa, ia);
                for (a, b) in o.to_array().into_iter().zip(i.to_array()) {
                    assert!((a as i32 - b as i32).abs() <= bound);
                }
            }
        }
    }

    #[test]
    fn test_cube_generation_deterministic() {
        let a = LookupCube::identity(8).unwrap();
        let b = LookupCube::identity(8).unwrap();
        assert_eq!(layout::flatten(&a), layout::flatten(&b));

        let mapper = RbfMapper::default();
        let wa = interpolate(&a, &dracula(), &mapper).unwrap();
        let wb = interpolate(&b, &dracula(), &mapper).unwrap();
        assert_eq!(layout::flatten(&wa), layout::flatten(&wb));
    }

    #[test]
    fn test_cached_cube_matches_in_memory_generation() {
        let dir = tempdir().unwrap();
        let cache = CubeCache::new(dir.path());
        let mapper = RbfMapper::default();

        let entry = cache.ensure_cube("dracula", &dracula(), 8, &mapper).unwrap();
        let loaded = cache.load(&entry).unwrap();
        let expected = interpolate(&LookupCube::identity(8).unwrap(), &dracula(), &mapper).unwrap();
        assert_eq!(loaded, expected);
    }

    #[test]
    fn test_concurrent_first_use_generates_once() {
        const CALLERS: usize = 8;
        let dir = tempdir().unwrap();
        let cache = CubeCache::new(dir.path());
        let barrier = Arc::new(Barrier::new(CALLERS));

        let results: Vec<_> = thread::scope(|s| {
            let handles: Vec<_> = (0..CALLERS)
                .map(|_| {
                    let cache = cache.clone();
                    let barrier = Arc::clone(&barrier);
                    s.spawn(move || {
                        barrier.wait();
                        let entry = cache
                            .ensure_cube("dracula", &dracula(), 8, &RbfMapper::default())
                            .unwrap();
                        let cube = cache.load(&entry).unwrap();
                        (entry, cube)
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        let generated = results.iter().filter(|(e, _)| e.generated).count();
        assert_eq!(generated, 1);

        let (first_entry, first_cube) = &results[0];
        for (entry, cube) in &results {
            assert_eq!(entry.path, first_entry.path);
            assert_eq!(cube.level(), 8);
            assert_eq!(cube, first_cube);
        }
        assert_eq!(std::fs::read_dir(cache.clut_dir()).unwrap().count(), 1);
    }

    #[test]
    fn test_concurrent_distinct_palettes() {
        let dir = tempdir().unwrap();
        let cache = CubeCache::new(dir.path());
        let palettes: Vec<Palette> = ["#000000", "#ff0000", "#00ff00", "#0000ff"]
            .iter()
            .map(|h| Palette::from_hex(&[*h, "#ffffff"]).unwrap())
            .collect();

        thread::scope(|s| {
            for (i, palette) in palettes.iter().enumerate() {
                let cache = cache.clone();
                s.spawn(move || {
                    let entry = cache
                        .ensure_cube(&format!("theme{i}"), palette, 6, &RbfMapper::default())
                        .unwrap();
                    assert!(entry.generated);
                });
            }
        });

        assert_eq!(std::fs::read_dir(cache.clut_dir()).unwrap().count(), 4);
    }

    #[test]
    fn test_nearest_neighbor_closure() {
        let palette = dracula();
        let img = sweep();
        let out = nearest_neighbor_transform(&img, &palette);
        for ((c, a), (_, ia)) in out.pixels().zip(img.pixels()) {
            assert!(palette.colors().contains(&c));
            assert_eq!(a, ia);
        }
    }

    #[test]
    fn test_distance_laws() {
        let colors: Vec<Color> = dracula().colors().to_vec();
        for &a in &colors {
            assert_eq!(distance(a, a), 0.0);
            for &b in &colors {
                assert!(distance(a, b) >= 0.0);
                assert_eq!(distance(a, b), distance(b, a));
            }
        }
    }

    #[test]
    fn test_hash_sensitivity() {
        let base = dracula();
        let key = palette_hash(&base);

        let mut changed: Vec<Color> = base.colors().to_vec();
        changed[3].b ^= 1;
        assert_ne!(key, palette_hash(&Palette::new(changed).unwrap()));

        let mut swapped: Vec<Color> = base.colors().to_vec();
        swapped.swap(0, 5);
        assert_ne!(key, palette_hash(&Palette::new(swapped).unwrap()));
    }

    #[test]
    fn test_black_white_gray_120() {
        // Weights sum to 1: distance to black is 120, to white 135.
        // Black wins on distance; the first-minimum rule is covered by the
        // equal-distance case below.
        let palette = Palette::new(vec![Color::BLACK, Color::WHITE]).unwrap();
        let gray = Color::new(120, 120, 120);
        assert!(distance(gray, Color::BLACK) < distance(gray, Color::WHITE));
        assert_eq!(nearest_color(gray, &palette), Color::BLACK);

        let img = RgbaImage::filled(3, 3, gray, 77).unwrap();
        let out = nearest_neighbor_transform(&img, &palette);
        assert!(out.pixels().all(|p| p == (Color::BLACK, 77)));

        let twins = Palette::new(vec![Color::new(110, 120, 120), Color::new(130, 120, 120)]).unwrap();
        assert_eq!(nearest_color(gray, &twins), Color::new(110, 120, 120));
    }

    #[test]
    fn test_single_red_palette_solid_output() {
        let red = Color::new(255, 0, 0);
        let palette = Palette::new(vec![red]).unwrap();
        let cube = interpolate(&LookupCube::identity(8).unwrap(), &palette, &RbfMapper::default())
            .unwrap();
        assert!(cube.data().iter().all(|&c| c == red));

        let img = sweep();
        let out = cube.apply_image(&img);
        for ((c, a), (_, ia)) in out.pixels().zip(img.pixels()) {
            assert_eq!(c, red);
            assert_eq!(a, ia);
        }
    }

    #[test]
    fn test_recolor_twice_byte_identical() {
        let dir = tempdir().unwrap();
        let mut themes = StaticThemes::new();
        themes.insert("dracula", dracula());
        let themes = Arc::new(themes);

        let first = Recolorer::new(RecolorConfig::with_cache_root(dir.path()), themes.clone())
            .unwrap();
        let a = first.recolor(&sweep(), "dracula").unwrap();
        let b = first.recolor(&sweep(), "dracula").unwrap();
        assert_eq!(png_bytes(&a), png_bytes(&b));

        // A fresh engine over the same cache root reads the published cube.
        let second = Recolorer::new(RecolorConfig::with_cache_root(dir.path()), themes).unwrap();
        let c = second.recolor(&sweep(), "dracula").unwrap();
        assert_eq!(png_bytes(&a), png_bytes(&c));
    }

    #[test]
    fn test_backends_differ_but_both_recolor() {
        let dir = tempdir().unwrap();
        let mut themes = StaticThemes::new();
        themes.insert("dracula", dracula());
        let r = Recolorer::new(RecolorConfig::with_cache_root(dir.path()), Arc::new(themes)).unwrap();

        let img = sweep();
        let clut = r
            .recolor_with_palette(&img, "dracula", &dracula(), ColorCorrectionBackend::Clut)
            .unwrap();
        let nn = r
            .recolor_with_palette(&img, "dracula", &dracula(), ColorCorrectionBackend::Nn)
            .unwrap();

        assert_ne!(clut, img);
        assert_ne!(nn, img);
        // Smooth blending yields colors outside the palette; snapping never does.
        assert!(clut.pixels().any(|(c, _)| !dracula().colors().contains(&c)));
    }

    #[test]
    fn test_file_roundtrip_pipeline() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("in.png");
        let output = dir.path().join("out.png");
        retint_io::write_image(&input, &sweep()).unwrap();

        let mut themes = StaticThemes::new();
        themes.insert("dracula", dracula());
        let r = Recolorer::new(
            RecolorConfig::with_cache_root(dir.path().join("cache")),
            Arc::new(themes),
        )
        .unwrap();

        let img = retint_io::read_image(&input).unwrap();
        let out = r.recolor(&img, "dracula").unwrap();
        retint_io::write_image(&output, &out).unwrap();
        assert_eq!(retint_io::read_image(&output).unwrap(), out);
    }
}
