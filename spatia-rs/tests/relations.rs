#[cfg(test)]
mod tests {
    use std::f64::consts::PI;

    use float_cmp::approx_eq;
    use rand::prelude::SmallRng;
    use rand::{Rng, SeedableRng};
    use test_case::test_case;

    use spatia_rs::context::SpatialContext;
    use spatia_rs::distance::units::SPHERE_RADIUS_DEG;
    use spatia_rs::geometry::primitives::{Point, Range, Rect};
    use spatia_rs::geometry::{AnyShape, Relate, Shape, SpatialRelation};

    const N_SHAPES: usize = 60;

    fn random_point(rng: &mut SmallRng, ctx: &SpatialContext) -> Point {
        match ctx.is_geo() {
            true => ctx
                .make_point(rng.random_range(-180.0..180.0), rng.random_range(-90.0..=90.0))
                .unwrap(),
            false => ctx
                .make_point(rng.random_range(-100.0..100.0), rng.random_range(-100.0..100.0))
                .unwrap(),
        }
    }

    /// Point at most `max_offset` away from `p` along both axes, kept within the world.
    fn nearby_point(rng: &mut SmallRng, p: Point, max_offset: f64, ctx: &SpatialContext) -> Point {
        let world = ctx.world_bounds();
        let x = p.x() + rng.random_range(-max_offset..max_offset);
        let y = p.y() + rng.random_range(-max_offset..max_offset);
        ctx.make_point(
            x.clamp(world.min_x(), world.max_x()),
            y.clamp(world.min_y(), world.max_y()),
        )
        .unwrap()
    }

    fn random_line(rng: &mut SmallRng, ctx: &SpatialContext) -> AnyShape {
        let a = random_point(rng, ctx);
        let (b, buf) = match ctx.is_geo() {
            true => (nearby_point(rng, a, 15.0, ctx), rng.random_range(0.1..3.0)),
            false => (random_point(rng, ctx), rng.random_range(0.1..10.0)),
        };
        AnyShape::BufferedLine(ctx.make_buffered_line(a, b, buf).unwrap())
    }

    fn random_simple_shape(rng: &mut SmallRng, ctx: &SpatialContext) -> AnyShape {
        let p = random_point(rng, ctx);
        let q = random_point(rng, ctx);
        match rng.random_range(0..5) {
            0 => AnyShape::Point(p),
            1 => {
                let (min_y, max_y) = (p.y().min(q.y()), p.y().max(q.y()));
                let (min_x, max_x) = match ctx.is_geo() {
                    //any pair of longitudes is a valid (possibly dateline crossing) range
                    true => (p.x(), q.x()),
                    false => (p.x().min(q.x()), p.x().max(q.x())),
                };
                AnyShape::Rect(ctx.make_rect(min_x, max_x, min_y, max_y).unwrap())
            }
            2 => {
                let radius = match ctx.is_geo() {
                    true => rng.random_range(0.5..170.0),
                    false => rng.random_range(0.5..80.0),
                };
                ctx.make_circle(p, radius).unwrap()
            }
            3 => {
                let radius = match ctx.is_geo() {
                    true => rng.random_range(0.1..20.0),
                    false => rng.random_range(0.1..10.0),
                };
                ctx.make_circle(p, radius).unwrap()
            }
            _ => random_line(rng, ctx),
        }
    }

    fn random_shape(rng: &mut SmallRng, ctx: &SpatialContext) -> AnyShape {
        match rng.random_range(0..7) {
            0..5 => random_simple_shape(rng, ctx),
            5 => {
                let max_offset = match ctx.is_geo() {
                    true => 10.0,
                    false => 30.0,
                };
                let mut points = vec![random_point(rng, ctx)];
                for _ in 0..rng.random_range(1..4) {
                    let last = points[points.len() - 1];
                    points.push(nearby_point(rng, last, max_offset, ctx));
                }
                let buf = rng.random_range(0.1..2.0);
                AnyShape::BufferedLineString(
                    ctx.make_buffered_line_string(points, buf, false).unwrap(),
                )
            }
            _ => {
                let members = (0..rng.random_range(2..4))
                    .map(|_| random_simple_shape(rng, ctx))
                    .collect::<Vec<_>>();
                AnyShape::Collection(ctx.make_collection(members))
            }
        }
    }

    /// Both sides relate member by member, so neither side delegates to the other.
    fn is_composite(s: &AnyShape) -> bool {
        matches!(s, AnyShape::Collection(_) | AnyShape::BufferedLineString(_))
    }

    fn same_kind_computed_twice(a: &AnyShape, b: &AnyShape) -> bool {
        matches!(
            (a, b),
            (AnyShape::BufferedLine(_), AnyShape::BufferedLine(_))
        ) || (is_composite(a) && is_composite(b))
    }

    #[test_case(SpatialContext::geo(); "geo")]
    #[test_case(SpatialContext::cartesian(); "cartesian")]
    fn relations_are_symmetric(ctx: SpatialContext) {
        let mut rng = SmallRng::seed_from_u64(0);
        let shapes = (0..N_SHAPES)
            .map(|_| random_shape(&mut rng, &ctx))
            .collect::<Vec<_>>();
        for a in &shapes {
            for b in &shapes {
                if a == b || same_kind_computed_twice(a, b) {
                    continue;
                }
                assert_eq!(
                    a.relate(b, &ctx),
                    b.relate(a, &ctx).transpose(),
                    "{a:?} vs {b:?}"
                );
            }
        }
    }

    #[test_case(SpatialContext::geo(); "geo")]
    #[test_case(SpatialContext::cartesian(); "cartesian")]
    fn bbox_is_never_disjoint_from_its_shape(ctx: SpatialContext) {
        let mut rng = SmallRng::seed_from_u64(1);
        for _ in 0..N_SHAPES * 4 {
            let shape = random_shape(&mut rng, &ctx);
            let bbox = AnyShape::Rect(shape.bbox());
            assert_ne!(
                bbox.relate(&shape, &ctx),
                SpatialRelation::Disjoint,
                "{shape:?}"
            );
            //the center of a composite is the center of its bbox, not of a member
            if is_composite(&shape) {
                continue;
            }
            assert_ne!(
                shape.relate(&AnyShape::Point(shape.center()), &ctx),
                SpatialRelation::Disjoint,
                "center of {shape:?}"
            );
        }
    }

    #[test]
    fn geo_circle_agrees_with_its_point_relations_on_lines() {
        let ctx = SpatialContext::geo();
        let mut rng = SmallRng::seed_from_u64(3);
        for _ in 0..N_SHAPES * 4 {
            //keep the buffered corners on the globe
            let a = ctx
                .make_point(rng.random_range(-150.0..150.0), rng.random_range(-70.0..70.0))
                .unwrap();
            let b = nearby_point(&mut rng, a, 15.0, &ctx);
            let line = ctx
                .make_buffered_line(a, b, rng.random_range(0.1..3.0))
                .unwrap();
            let center = nearby_point(&mut rng, line.center(), 20.0, &ctx);
            let circle = ctx
                .make_circle(center, rng.random_range(0.1..30.0))
                .unwrap();
            let sect = circle.relate(&AnyShape::BufferedLine(line.clone()), &ctx);

            let corners_inside = line
                .corners()
                .iter()
                .filter(|c| {
                    circle.relate(&AnyShape::Point(**c), &ctx) != SpatialRelation::Disjoint
                })
                .count();
            let midpoint_inside =
                circle.relate(&AnyShape::Point(line.center()), &ctx) != SpatialRelation::Disjoint;
            if midpoint_inside || corners_inside > 0 {
                assert_ne!(sect, SpatialRelation::Disjoint, "{circle:?} vs {line:?}");
            }
            if sect == SpatialRelation::Contains {
                assert_eq!(corners_inside, 4, "{circle:?} vs {line:?}");
            }
        }
    }

    #[test]
    fn box_around_point_holds_points_on_every_bearing() {
        let ctx = SpatialContext::geo();
        let calc = ctx.calculator();
        let mut rng = SmallRng::seed_from_u64(2);
        for _ in 0..500 {
            let from = ctx
                .make_point(rng.random_range(-180.0..180.0), rng.random_range(-89.0..89.0))
                .unwrap();
            let dist = rng.random_range(0.0..60.0);
            let bbox = AnyShape::Rect(calc.calc_box_by_dist_from_pt(from, dist, &ctx));
            for bearing in (0..360).step_by(15) {
                let p = calc.point_on_bearing(from, dist * 0.999, bearing as f64);
                assert_ne!(
                    bbox.relate(&AnyShape::Point(p), &ctx),
                    SpatialRelation::Disjoint,
                    "{from:?} at {dist} bearing {bearing}: {p:?} outside {bbox:?}"
                );
            }
        }
    }

    #[test]
    fn dateline_rect_contains_antimeridian_point() {
        let ctx = SpatialContext::geo();
        let rect = AnyShape::Rect(ctx.make_rect(160.0, -170.0, 0.0, 10.0).unwrap());
        let point = AnyShape::Point(ctx.make_point(-180.0, 5.0).unwrap());
        assert_eq!(rect.relate(&point, &ctx), SpatialRelation::Contains);
        assert_eq!(point.relate(&rect, &ctx), SpatialRelation::Within);
    }

    #[test]
    fn separated_rects_are_disjoint() {
        let ctx = SpatialContext::cartesian();
        let a = AnyShape::Rect(ctx.make_rect(0.0, 10.0, 0.0, 10.0).unwrap());
        let b = AnyShape::Rect(ctx.make_rect(20.0, 30.0, 0.0, 10.0).unwrap());
        assert_eq!(a.relate(&b, &ctx), SpatialRelation::Disjoint);
    }

    #[test]
    fn hemisphere_contains_equatorial_rect() {
        let ctx = SpatialContext::geo();
        let circle = ctx.make_circle(Point(0.0, 0.0), 90.0).unwrap();
        let rect = AnyShape::Rect(ctx.make_rect(-10.0, 10.0, -10.0, 10.0).unwrap());
        assert_eq!(circle.relate(&rect, &ctx), SpatialRelation::Contains);
        assert_eq!(rect.relate(&circle, &ctx), SpatialRelation::Within);
    }

    #[test]
    fn circle_of_half_a_great_circle_covers_the_globe() {
        let ctx = SpatialContext::geo();
        let circle = ctx.make_circle(Point(12.0, -34.0), 180.0).unwrap();
        let expected = 4.0 * PI * SPHERE_RADIUS_DEG * SPHERE_RADIUS_DEG;
        assert!(approx_eq!(f64, circle.area(&ctx), expected, epsilon = 1e-6));
        assert_eq!(
            circle.relate(&AnyShape::Rect(Rect::GEO_WORLD), &ctx),
            SpatialRelation::Contains
        );
    }

    #[test]
    fn halves_of_the_world_have_a_world_bbox() {
        let ctx = SpatialContext::geo();
        let west = AnyShape::Rect(ctx.make_rect(-180.0, 0.0, -90.0, 90.0).unwrap());
        let east = AnyShape::Rect(ctx.make_rect(0.0, 180.0, -90.0, 90.0).unwrap());
        let c = ctx.make_collection(vec![west, east]);
        assert_eq!(c.bbox(), Rect::GEO_WORLD);
    }

    #[test]
    fn longitude_range_across_the_dateline() {
        let range = Range::Longitude {
            min: 170.0,
            max: -170.0,
        };
        assert!(range.contains(180.0));
        assert!(range.contains(-180.0));
        assert!(!range.contains(0.0));
        assert_eq!(range.width(), 20.0);
    }
}
