mod tests {
    use myrtio_marble_clock::flow::release;
    use myrtio_marble_clock::geometry::{ChannelLayout, PATH_MAX, ROW_MAX};
    use myrtio_marble_clock::{ChannelGrid, DrawRegion, Geometry, GeometryConfig, GeometryError, Occupancy};

    const REGION: DrawRegion = DrawRegion::below_header(320, 240, 40);

    fn distance_sq(a: myrtio_marble_clock::Point, b: myrtio_marble_clock::Point) -> i32 {
        let dx = a.x - b.x;
        let dy = a.y - b.y;
        dx * dx + dy * dy
    }

    #[test]
    fn test_default_layout() {
        let config = GeometryConfig::DEFAULT;
        let geometry = Geometry::build(&config, REGION).unwrap();
        assert_eq!(geometry.rows(), 7);

        let mut previous_len = 0;
        for (row, channel) in geometry.channels.iter().enumerate() {
            let radius = config.radius(row);
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let arc = (core::f32::consts::PI * radius as f32 / 6.5).floor() as usize;
            assert_eq!(channel.len(), 2 * 25 + arc);

            // Stop strictly between head and tail, a quarter into the arc
            assert!(channel.stop > 0 && channel.stop < channel.len() - 1);
            assert!(channel.stop >= 25 && channel.stop < 25 + arc);

            // Outer rows are longer
            assert!(channel.len() > previous_len);
            previous_len = channel.len();

            for point in &channel.points {
                assert!(REGION.contains(*point), "{point:?} outside region");
            }
        }
    }

    #[test]
    fn test_straight_runs_align() {
        let geometry = Geometry::build(&GeometryConfig::DEFAULT, REGION).unwrap();
        let inner = &geometry.channels[0];
        let outer = &geometry.channels[6];

        // Head is the rightmost top cell, tail the rightmost bottom cell
        let head = inner.points[0];
        let tail = inner.points[inner.len() - 1];
        assert_eq!(head.x, tail.x);
        assert!(head.y < tail.y);

        // Tail runs of all rows share their columns, one pitch apart
        for column in 0..25 {
            let a = inner.points[inner.len() - 1 - column];
            let b = outer.points[outer.len() - 1 - column];
            assert_eq!(a.x, b.x);
            assert_eq!(b.y - a.y, 6 * 5);
        }

        // Top runs step right to left, bottom runs left to right
        assert_eq!(inner.points[0].x - inner.points[1].x, 5);
        assert_eq!(tail.x - inner.points[inner.len() - 2].x, 5);
    }

    #[test]
    fn test_arc_spacing() {
        let geometry = Geometry::build(&GeometryConfig::DEFAULT, REGION).unwrap();
        for channel in &geometry.channels {
            for pair in channel.points.windows(2) {
                // Rounded samples of a 6.5px spacing stay at least 5px apart
                assert!(distance_sq(pair[0], pair[1]) >= 25, "{pair:?} too close");
            }
        }
    }

    #[test]
    fn test_rows_do_not_overlap() {
        let geometry = Geometry::build(&GeometryConfig::DEFAULT, REGION).unwrap();
        for (i, a) in geometry.channels.iter().enumerate() {
            for b in geometry.channels.iter().skip(i + 1) {
                for p in &a.points {
                    assert!(!b.points.contains(p));
                }
            }
        }
    }

    #[test]
    fn test_build_is_idempotent() {
        let first = Geometry::build(&GeometryConfig::DEFAULT, REGION).unwrap();
        let second = Geometry::build(&GeometryConfig::DEFAULT, REGION).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_build_errors() {
        let tiny = DrawRegion::below_header(100, 100, 40);
        assert_eq!(
            Geometry::build(&GeometryConfig::DEFAULT, tiny),
            Err(GeometryError::RegionTooSmall)
        );

        let config = GeometryConfig {
            rows: ROW_MAX + 1,
            ..GeometryConfig::DEFAULT
        };
        assert_eq!(Geometry::build(&config, REGION), Err(GeometryError::Rows(ROW_MAX + 1)));

        let config = GeometryConfig {
            columns: 0,
            ..GeometryConfig::DEFAULT
        };
        assert_eq!(Geometry::build(&config, REGION), Err(GeometryError::Columns(0)));

        let config = GeometryConfig {
            min_radius: 0,
            dot_pitch: 1,
            ..GeometryConfig::DEFAULT
        };
        assert_eq!(
            Geometry::build(&config, REGION),
            Err(GeometryError::ArcTooShort { row: 0 })
        );

        let config = GeometryConfig {
            columns: 40,
            rows: 8,
            dot_size: 1,
            dot_pitch: 2,
            min_radius: 60,
            arc_margin: 0.0,
        };
        let wide = DrawRegion::below_header(2000, 2000, 0);
        assert!(matches!(
            Geometry::build(&config, wide),
            Err(GeometryError::PathTooLong { row: 0, len }) if len > PATH_MAX
        ));
    }

    #[test]
    fn test_grid_starts_empty() {
        let geometry = Geometry::build(&GeometryConfig::DEFAULT, REGION).unwrap();
        let grid = ChannelGrid::new(&geometry);
        assert_eq!(grid.rows(), 7);
        assert_eq!(grid.columns(), 25);
        assert_eq!(grid.token_count(), 0);
        assert!(grid.slots().all(|slot| slot.occupancy == Occupancy::Empty));

        for (channel, layout) in grid.channels().iter().zip(&geometry.channels) {
            assert_eq!(channel.len(), layout.len());
            assert_eq!(channel.stop(), layout.stop);
            assert_eq!(channel.tail_side_len(), layout.len() - 1 - layout.stop);
        }
    }

    #[test]
    fn test_grid_tolerates_channel_without_slots() {
        let mut channels = heapless::Vec::new();
        channels
            .push(ChannelLayout {
                points: heapless::Vec::new(),
                stop: 3,
            })
            .unwrap();
        let geometry = Geometry {
            channels,
            columns: 25,
            dot_size: 4,
        };
        let mut grid = ChannelGrid::new(&geometry);

        let channel = grid.channel(0).unwrap();
        assert_eq!(channel.tail(), 0);
        assert_eq!(channel.tail_side_len(), 0);
        assert!(channel.is_settled());
        assert_eq!(grid.display_index(0, 0), None);
        assert_eq!(grid.max_tail_side_len(), 0);
        assert!(grid.is_display_empty());

        let channel = grid.channel_mut(0).unwrap();
        channel.set(0, Occupancy::Light);
        assert!(!release(channel));
        assert_eq!(grid.token_count(), 0);
    }
}
