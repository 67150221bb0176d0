#[cfg(test)]
mod sampler {
    use crate::charge::Charge;
    use crate::config::{ExternalField, SimConfig, COULOMB_K};
    use crate::field::FieldSampler;
    use ultraviolet::DVec2;

    fn single(q: f64) -> Vec<Charge> {
        vec![Charge::placed(DVec2::zero(), q)]
    }

    #[test]
    fn point_charge_field_and_potential() {
        let charges = single(1e-6);
        let config = SimConfig::default();
        let sampler = FieldSampler::new(&charges, &config, 0.0);
        let e = sampler.field_at(DVec2::new(10.0, 0.0));
        assert!((e.x - 89.9).abs() < 1e-9);
        assert!(e.y.abs() < 1e-12);
        let v = sampler.potential_at(DVec2::new(0.0, -10.0));
        assert!((v - 899.0).abs() < 1e-9);
    }

    #[test]
    fn negative_charge_field_points_inward() {
        let charges = single(-1e-6);
        let config = SimConfig::default();
        let sampler = FieldSampler::new(&charges, &config, 0.0);
        let e = sampler.field_at(DVec2::new(0.0, 20.0));
        assert!(e.y < 0.0);
        assert!(sampler.potential_at(DVec2::new(0.0, 20.0)) < 0.0);
    }

    #[test]
    fn points_inside_unit_radius_are_skipped() {
        let charges = single(1e-6);
        let config = SimConfig::default();
        let sampler = FieldSampler::new(&charges, &config, 0.0);
        assert_eq!(sampler.field_at(DVec2::new(0.5, 0.5)), DVec2::zero());
        assert_eq!(sampler.potential_at(DVec2::new(0.0, 0.999)), 0.0);
        let v = sampler.potential_at(DVec2::new(1.0, 0.0));
        assert!((v - COULOMB_K * 1e-6).abs() < 1e-6);
    }

    #[test]
    fn external_field_is_added_at_sampler_time() {
        let charges: Vec<Charge> = Vec::new();
        let mut config = SimConfig::default();
        config.external_field = ExternalField {
            enabled: true,
            amplitude: 500.0,
            frequency: 1.0,
        };
        let at_quarter = FieldSampler::new(&charges, &config, 0.25);
        assert!((at_quarter.field_at(DVec2::new(3.0, 4.0)).x - 500.0).abs() < 1e-9);
        let at_zero = FieldSampler::new(&charges, &config, 0.0);
        assert!(at_zero.field_at(DVec2::new(3.0, 4.0)).x.abs() < 1e-9);
        // Potential ignores the external field.
        assert_eq!(at_quarter.potential_at(DVec2::new(3.0, 4.0)), 0.0);
    }

    #[test]
    fn probe_reports_test_charge_force() {
        let charges = single(1e-6);
        let config = SimConfig::default();
        let probe = FieldSampler::new(&charges, &config, 0.0).probe(DVec2::new(0.0, 10.0));
        assert!((probe.magnitude - 89.9).abs() < 1e-9);
        assert!((probe.potential - 899.0).abs() < 1e-9);
        assert!((probe.test_force - 8.99e-5).abs() < 1e-15);
    }
}

#[cfg(test)]
mod grids {
    use crate::charge::Charge;
    use crate::config::SimConfig;
    use crate::field::{arrow_grid, field_magnitude_color, heatmap, potential_color, potential_grid, FieldSampler};
    use crate::view::WorldRect;
    use palette::Srgb;
    use ultraviolet::DVec2;

    #[test]
    fn potential_colors_saturate() {
        assert_eq!(potential_color(0.0), Srgb::new(255u8, 255, 255));
        assert_eq!(potential_color(5000.0), Srgb::new(255u8, 0, 0));
        assert_eq!(potential_color(-3000.0), Srgb::new(0u8, 0, 255));
        let warm = potential_color(1500.0);
        assert_eq!(warm.red, 255);
        assert!(warm.green > 100 && warm.green < 150);
    }

    #[test]
    fn magnitude_colors_run_blue_green_red() {
        assert_eq!(field_magnitude_color(0.0), Srgb::new(0u8, 0, 255));
        assert_eq!(field_magnitude_color(0.5), Srgb::new(0u8, 255, 0));
        assert_eq!(field_magnitude_color(2.0), Srgb::new(255u8, 0, 0));
        assert_eq!(field_magnitude_color(f64::NAN), Srgb::new(0u8, 0, 255));
    }

    #[test]
    fn potential_grid_is_row_major() {
        let charges = vec![Charge::placed(DVec2::new(10.0, 10.0), 1e-6)];
        let config = SimConfig::default();
        let sampler = FieldSampler::new(&charges, &config, 0.0);
        let rect = WorldRect::from_size(80.0, 40.0);
        let grid = potential_grid(&sampler, &rect, 4, 2);
        assert_eq!(grid.len(), 8);
        assert_eq!(grid[0], sampler.potential_at(DVec2::new(0.0, 0.0)));
        assert_eq!(grid[1], sampler.potential_at(DVec2::new(20.0, 0.0)));
        assert_eq!(grid[4], sampler.potential_at(DVec2::new(0.0, 20.0)));
        assert!(potential_grid(&sampler, &rect, 0, 3).is_empty());
        assert_eq!(heatmap(&sampler, &rect, 4, 2).len(), 8);
    }

    #[test]
    fn arrows_are_aligned_to_half_cells() {
        let charges = vec![Charge::placed(DVec2::new(50.0, 50.0), 1e-6)];
        let config = SimConfig::default();
        let sampler = FieldSampler::new(&charges, &config, 0.0);
        let arrows = arrow_grid(&sampler, &WorldRect::from_size(100.0, 100.0), 50.0);
        let mut origins: Vec<(f64, f64)> = arrows.iter().map(|a| (a.origin.x, a.origin.y)).collect();
        origins.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert_eq!(origins, vec![(25.0, 25.0), (25.0, 75.0), (75.0, 25.0), (75.0, 75.0)]);
        // Field points away from the positive charge.
        let a = arrows.iter().find(|a| a.origin == DVec2::new(25.0, 25.0)).unwrap();
        assert!(a.field.x < 0.0 && a.field.y < 0.0);
    }

    #[test]
    fn weak_field_produces_no_arrows() {
        let charges: Vec<Charge> = Vec::new();
        let config = SimConfig::default();
        let sampler = FieldSampler::new(&charges, &config, 0.0);
        assert!(arrow_grid(&sampler, &WorldRect::from_size(400.0, 400.0), 50.0).is_empty());
        assert!(arrow_grid(&sampler, &WorldRect::from_size(400.0, 400.0), 0.0).is_empty());
    }
}

#[cfg(test)]
mod lines {
    use crate::charge::Charge;
    use crate::config::SimConfig;
    use crate::field::{streamlines, trace, FieldSampler, StreamlineSettings};
    use crate::view::WorldRect;
    use ultraviolet::DVec2;

    #[test]
    fn line_count_scales_with_charge() {
        let settings = StreamlineSettings::default();
        assert_eq!(settings.line_count(1e-6), 12);
        assert_eq!(settings.line_count(-2.5e-6), 30);
        assert_eq!(settings.line_count(1e-9), 1);
    }

    #[test]
    fn lone_charge_lines_run_outward_until_leaving_view() {
        let bounds = WorldRect::from_size(800.0, 600.0);
        let charges = vec![Charge::placed(bounds.center(), 1e-6)];
        let config = SimConfig::default();
        let sampler = FieldSampler::new(&charges, &config, 0.0);
        let lines = streamlines(&sampler, &bounds, &StreamlineSettings::default());
        assert_eq!(lines.len(), 12);
        for line in &lines {
            assert!(((line[0] - bounds.center()).mag() - 14.0).abs() < 1e-9);
            let distances: Vec<f64> = line.iter().map(|p| (*p - bounds.center()).mag()).collect();
            assert!(distances.windows(2).all(|w| w[1] > w[0]));
            assert!(line.iter().all(|p| bounds.contains(*p)));
        }
    }

    #[test]
    fn line_stops_near_opposite_charge() {
        let bounds = WorldRect::from_size(800.0, 600.0);
        let negative = DVec2::new(500.0, 300.0);
        let charges = vec![
            Charge::placed(DVec2::new(300.0, 300.0), 1e-6),
            Charge::placed(negative, -1e-6),
        ];
        let config = SimConfig::default();
        let sampler = FieldSampler::new(&charges, &config, 0.0);
        let settings = StreamlineSettings::default();
        let path = trace(&sampler, DVec2::new(314.0, 300.0), 1.0, &bounds, &settings);
        let end = *path.last().unwrap();
        let gap = (end - negative).mag();
        assert!(gap >= settings.stop_radius - 1e-6);
        assert!(gap < settings.stop_radius + settings.step + 1e-6);
        assert!(path.len() < settings.max_steps);
    }

    #[test]
    fn zero_field_trace_is_a_single_point() {
        let charges: Vec<Charge> = Vec::new();
        let config = SimConfig::default();
        let sampler = FieldSampler::new(&charges, &config, 0.0);
        let bounds = WorldRect::from_size(100.0, 100.0);
        let path = trace(&sampler, DVec2::new(50.0, 50.0), 1.0, &bounds, &StreamlineSettings::default());
        assert_eq!(path, vec![DVec2::new(50.0, 50.0)]);
    }
}
