mod tests {
    use myrtio_marble_clock::glyph::{GLYPH_HEIGHT, GLYPH_WIDTH, glyph, is_lit};
    use myrtio_marble_clock::{Occupancy, StagingBuffer, TimeText, TimeTextError};

    /// Render a glyph as rows of `#` and `.`, top row first
    fn picture(ch: u8) -> [[u8; GLYPH_WIDTH]; GLYPH_HEIGHT] {
        let glyph = glyph(ch).expect("glyph");
        let mut rows = [[b'.'; GLYPH_WIDTH]; GLYPH_HEIGHT];
        for (y, row) in rows.iter_mut().enumerate() {
            for (x, dot) in row.iter_mut().enumerate() {
                if is_lit(glyph, x, y) {
                    *dot = b'#';
                }
            }
        }
        rows
    }

    #[test]
    fn test_glyph_one() {
        assert_eq!(
            picture(b'1'),
            [
                *b"..#..",
                *b".##..",
                *b"..#..",
                *b"..#..",
                *b"..#..",
                *b"..#..",
                *b".###.",
            ]
        );
    }

    #[test]
    fn test_glyph_seven_and_colon() {
        assert_eq!(picture(b'7')[0], *b"#####");
        assert_eq!(picture(b'7')[1], *b"....#");
        assert_eq!(picture(b':')[0], *b".....");
        assert_eq!(picture(b':')[1], *b".##..");
    }

    #[test]
    fn test_glyph_unsupported() {
        assert!(glyph(b'a').is_none());
        assert!(glyph(b' ').is_none());
        assert!(glyph(b'/').is_none());
        for ch in b'0'..=b'9' {
            assert!(glyph(ch).is_some());
        }
    }

    #[test]
    fn test_time_text_parse() {
        let time = TimeText::parse("07:45").unwrap();
        assert_eq!(time.as_str(), "07:45");
        assert_eq!(time, TimeText::from_hm(7, 45).unwrap());

        assert_eq!(TimeText::parse("7:45"), Err(TimeTextError::Length));
        assert_eq!(TimeText::parse("07-45"), Err(TimeTextError::Character(b'-')));
        assert_eq!(TimeText::parse("0a:45"), Err(TimeTextError::Character(b'a')));
        assert_eq!(TimeText::parse("24:00"), Err(TimeTextError::OutOfRange));
        assert_eq!(TimeText::parse("23:60"), Err(TimeTextError::OutOfRange));
        assert_eq!(TimeText::from_hm(23, 59).unwrap().as_str(), "23:59");
    }

    #[test]
    fn test_staging_reading_order() {
        let time = TimeText::parse("12:34").unwrap();
        let staging = StagingBuffer::encode(&time);
        assert_eq!(staging.width(), 25);

        for (index, ch) in b"12:34".iter().enumerate() {
            let glyph = glyph(*ch).unwrap();
            for x in 0..GLYPH_WIDTH {
                for y in 0..GLYPH_HEIGHT {
                    let expected = if is_lit(glyph, x, y) {
                        Occupancy::Light
                    } else {
                        Occupancy::Dark
                    };
                    assert_eq!(staging.get(index * GLYPH_WIDTH + x, y), expected);
                }
            }
        }
    }

    #[test]
    fn test_staging_never_empty() {
        let staging = StagingBuffer::encode(&TimeText::parse("00:00").unwrap());
        for column in 0..staging.width() {
            for row in 0..GLYPH_HEIGHT {
                assert_ne!(staging.get(column, row), Occupancy::Empty);
            }
        }
    }

    #[test]
    fn test_staging_pops_right_to_left() {
        let mut staging = StagingBuffer::encode(&TimeText::parse("18:00").unwrap());
        assert_eq!(staging.cursor(0), Some(24));
        assert_eq!(staging.remaining(), 25 * GLYPH_HEIGHT);

        let last = staging.get(24, 3);
        assert_eq!(staging.pop(3), last);
        assert_eq!(staging.cursor(3), Some(23));
        // Other rows keep their own cursor
        assert_eq!(staging.cursor(2), Some(24));

        for _ in 0..24 {
            assert_ne!(staging.pop(3), Occupancy::Empty);
        }
        assert!(staging.is_exhausted(3));
        assert_eq!(staging.pop(3), Occupancy::Empty);
        assert_eq!(staging.pop(3), Occupancy::Empty);

        staging.rewind();
        assert_eq!(staging.cursor(3), Some(24));
    }
}
