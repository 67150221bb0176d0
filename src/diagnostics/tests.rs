#[cfg(test)]
mod flux {
    use crate::charge::Charge;
    use crate::config::{COULOMB_K, EPSILON_0};
    use crate::diagnostics::{dipole_moment, flux, point_in_polygon, system_energy, FluxPolygon};
    use ultraviolet::DVec2;

    fn square(min: f64, max: f64) -> FluxPolygon {
        let mut polygon = FluxPolygon::new();
        polygon.push_vertex(DVec2::new(min, min));
        polygon.push_vertex(DVec2::new(max, min));
        polygon.push_vertex(DVec2::new(max, max));
        polygon.push_vertex(DVec2::new(min, max));
        assert!(polygon.close());
        polygon
    }

    #[test]
    fn enclosing_one_microcoulomb() {
        let charges = vec![
            Charge::placed(DVec2::new(50.0, 50.0), 1e-6),
            Charge::placed(DVec2::new(500.0, 50.0), -3e-6),
        ];
        let phi = flux(&charges, &square(0.0, 100.0), EPSILON_0);
        let expected = 1e-6 / 8.854e-12;
        assert!((phi - expected).abs() / expected < 1e-12);
        assert!((phi - 1.1294e5).abs() < 10.0);
    }

    #[test]
    fn excluded_charge_gives_zero() {
        let charges = vec![Charge::placed(DVec2::new(150.0, 50.0), 1e-6)];
        assert_eq!(flux(&charges, &square(0.0, 100.0), EPSILON_0), 0.0);
    }

    #[test]
    fn open_polygon_gives_zero() {
        let charges = vec![Charge::placed(DVec2::new(50.0, 50.0), 1e-6)];
        let mut polygon = FluxPolygon::new();
        for v in [(0.0, 0.0), (100.0, 0.0), (100.0, 100.0), (0.0, 100.0)] {
            polygon.push_vertex(DVec2::new(v.0, v.1));
        }
        assert_eq!(flux(&charges, &polygon, EPSILON_0), 0.0);
        assert_eq!(flux(&charges, &FluxPolygon::Empty, EPSILON_0), 0.0);
    }

    #[test]
    fn ray_casting_handles_concave_shapes() {
        // A "U": the notch between the arms is outside.
        let u = [
            DVec2::new(0.0, 0.0),
            DVec2::new(30.0, 0.0),
            DVec2::new(30.0, 30.0),
            DVec2::new(20.0, 30.0),
            DVec2::new(20.0, 10.0),
            DVec2::new(10.0, 10.0),
            DVec2::new(10.0, 30.0),
            DVec2::new(0.0, 30.0),
        ];
        assert!(point_in_polygon(DVec2::new(5.0, 20.0), &u));
        assert!(point_in_polygon(DVec2::new(15.0, 5.0), &u));
        assert!(!point_in_polygon(DVec2::new(15.0, 20.0), &u));
        assert!(!point_in_polygon(DVec2::new(-1.0, 5.0), &u));
    }

    #[test]
    fn energy_includes_unit_separation_only() {
        let at_one = vec![
            Charge::placed(DVec2::zero(), 1e-6),
            Charge::placed(DVec2::new(1.0, 0.0), 1e-6),
        ];
        let e = system_energy(&at_one, COULOMB_K);
        assert!((e - COULOMB_K * 1e-12).abs() < 1e-15);

        let too_close = vec![
            Charge::placed(DVec2::zero(), 1e-6),
            Charge::placed(DVec2::new(0.999, 0.0), 1e-6),
        ];
        assert_eq!(system_energy(&too_close, COULOMB_K), 0.0);
    }

    #[test]
    fn opposite_pair_has_negative_energy() {
        let charges = vec![
            Charge::placed(DVec2::zero(), 1e-6),
            Charge::placed(DVec2::new(10.0, 0.0), -1e-6),
        ];
        let e = system_energy(&charges, COULOMB_K);
        assert!((e + COULOMB_K * 1e-13).abs() < 1e-15);
    }

    #[test]
    fn dipole_moment_of_symmetric_pair() {
        let charges = vec![
            Charge::placed(DVec2::new(70.0, 0.0), 1e-6),
            Charge::placed(DVec2::new(130.0, 0.0), -1e-6),
        ];
        let p = dipole_moment(&charges);
        assert!((p.x + 60e-6).abs() < 1e-15);
        assert_eq!(p.y, 0.0);
    }
}

#[cfg(test)]
mod polygon_states {
    use crate::diagnostics::FluxPolygon;
    use ultraviolet::DVec2;

    #[test]
    fn close_requires_three_vertices() {
        let mut polygon = FluxPolygon::new();
        assert!(!polygon.close());
        polygon.push_vertex(DVec2::new(0.0, 0.0));
        polygon.push_vertex(DVec2::new(10.0, 0.0));
        assert!(!polygon.close());
        assert!(matches!(polygon, FluxPolygon::Open(_)));
        polygon.push_vertex(DVec2::new(10.0, 10.0));
        assert!(polygon.close());
        assert!(polygon.is_closed());
        assert!(polygon.contains(DVec2::new(8.0, 2.0)));
    }

    #[test]
    fn appending_reopens_and_reset_empties() {
        let mut polygon = FluxPolygon::new();
        for v in [(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)] {
            polygon.push_vertex(DVec2::new(v.0, v.1));
        }
        polygon.close();
        polygon.push_vertex(DVec2::new(0.0, 10.0));
        assert!(!polygon.is_closed());
        assert_eq!(polygon.len(), 4);
        assert!(!polygon.contains(DVec2::new(5.0, 5.0)));

        polygon.reset();
        assert_eq!(polygon, FluxPolygon::Empty);
        assert!(polygon.is_empty());
    }
}
