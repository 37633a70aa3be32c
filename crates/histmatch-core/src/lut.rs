//! Lookup table construction and application
//!
//! Builds a 256-entry-per-channel remapping table from the percentile
//! statistics of a source and reference image, and applies it to channel
//! planes to produce remapped pixel data.

use rayon::prelude::*;

use crate::decoders::DecodedImage;
use crate::stats::ChannelHistogram;

/// Minimum number of pixels to trigger parallel remapping
pub(crate) const PARALLEL_THRESHOLD: usize = 30_000;

/// Entries per channel in a lookup table
pub const CHANNEL_TABLE_SIZE: usize = 256;

/// Number of channels covered by a table
pub const TABLE_CHANNELS: usize = 3;

/// Per-channel intensity remapping table
///
/// Holds 256 entries for each RGB channel, concatenated in channel order.
/// Entry `c * 256 + v` maps old intensity `v` of channel `c` to its new
/// intensity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupTable {
    entries: Vec<u8>,
}

impl LookupTable {
    /// All 768 entries in channel order
    pub fn entries(&self) -> &[u8] {
        &self.entries
    }

    /// The 256-entry slice for one channel
    pub fn channel_table(&self, channel: usize) -> &[u8] {
        &self.entries[channel * CHANNEL_TABLE_SIZE..(channel + 1) * CHANNEL_TABLE_SIZE]
    }

    /// New intensity for `value` in `channel`
    pub fn lookup(&self, channel: usize, value: u8) -> u8 {
        self.entries[channel * CHANNEL_TABLE_SIZE + value as usize]
    }

    /// Remap a triple of channel planes into interleaved RGB data
    ///
    /// Output pixel `i`, channel `c` is the table entry for `planes[c][i]`.
    /// All three planes must have the same length.
    pub fn remap(&self, planes: &[Vec<u8>; 3]) -> Vec<u8> {
        let pixel_count = planes[0].len();
        let tables = [
            self.channel_table(0),
            self.channel_table(1),
            self.channel_table(2),
        ];

        let mut data = vec![0u8; pixel_count * 3];

        if pixel_count >= PARALLEL_THRESHOLD {
            data.par_chunks_exact_mut(3)
                .enumerate()
                .for_each(|(i, pixel)| {
                    pixel[0] = tables[0][planes[0][i] as usize];
                    pixel[1] = tables[1][planes[1][i] as usize];
                    pixel[2] = tables[2][planes[2][i] as usize];
                });
        } else {
            for (i, pixel) in data.chunks_exact_mut(3).enumerate() {
                pixel[0] = tables[0][planes[0][i] as usize];
                pixel[1] = tables[1][planes[1][i] as usize];
                pixel[2] = tables[2][planes[2][i] as usize];
            }
        }

        data
    }
}

/// Map a single intensity from the source distribution into the reference
/// distribution
///
/// Computes the percentile rank of `value` in `source`, then looks up the
/// value at that percentile in `reference`. The result is a real number;
/// callers truncate toward zero (never round) before storing it, so 127.9
/// becomes 127.
pub fn map_intensity(
    value: u8,
    source: &ChannelHistogram,
    reference: &ChannelHistogram,
) -> f64 {
    reference.percentile_value(source.percentile_rank(value))
}

/// Build the full three-channel lookup table from two decoded images
///
/// For each channel, every possible intensity 0-255 is mapped from the
/// source channel's distribution into the reference channel's distribution.
/// The images need not share dimensions. Pure function of its two inputs;
/// calling it twice with the same images yields identical tables.
pub fn build_lookup_table(source: &DecodedImage, reference: &DecodedImage) -> LookupTable {
    let mut entries = Vec::with_capacity(TABLE_CHANNELS * CHANNEL_TABLE_SIZE);

    for channel in 0..TABLE_CHANNELS {
        let source_hist = ChannelHistogram::from_channel(&source.data, channel, source.channels);
        let reference_hist =
            ChannelHistogram::from_channel(&reference.data, channel, reference.channels);

        for value in 0..CHANNEL_TABLE_SIZE {
            let mapped = map_intensity(value as u8, &source_hist, &reference_hist);
            // Truncation toward zero, not rounding
            entries.push(mapped as u8);
        }
    }

    LookupTable { entries }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_image(width: u32, height: u32, pixels: &[[u8; 3]]) -> DecodedImage {
        let data: Vec<u8> = pixels.iter().flatten().copied().collect();
        assert_eq!(data.len(), (width * height * 3) as usize);
        DecodedImage {
            width,
            height,
            data,
            channels: 3,
            source_is_grayscale: false,
        }
    }

    #[test]
    fn test_table_has_full_coverage() {
        let source = make_image(2, 2, &[[10, 20, 30]; 4]);
        let reference = make_image(2, 2, &[[200, 100, 50]; 4]);

        let table = build_lookup_table(&source, &reference);

        assert_eq!(table.entries().len(), TABLE_CHANNELS * CHANNEL_TABLE_SIZE);
        for channel in 0..TABLE_CHANNELS {
            assert_eq!(table.channel_table(channel).len(), CHANNEL_TABLE_SIZE);
        }
    }

    #[test]
    fn test_self_match_maps_present_values_to_themselves() {
        // Every present intensity occurs more than once, so the rank-to-value
        // round trip is exact for those entries
        let pixels = [[0, 100, 200], [0, 100, 200], [50, 150, 250], [50, 150, 250]];
        let image = make_image(2, 2, &pixels);

        let table = build_lookup_table(&image, &image);

        assert_eq!(table.lookup(0, 0), 0);
        assert_eq!(table.lookup(0, 50), 50);
        assert_eq!(table.lookup(1, 100), 100);
        assert_eq!(table.lookup(1, 150), 150);
        assert_eq!(table.lookup(2, 200), 200);
        assert_eq!(table.lookup(2, 250), 250);
    }

    #[test]
    fn test_map_intensity_half_split_lands_on_median() {
        let source = ChannelHistogram::from_plane(&[0, 0, 255, 255]);
        let reference = ChannelHistogram::from_plane(&[0, 85, 170, 255]);

        // 128 splits the source evenly, landing on the reference median
        assert!((map_intensity(128, &source, &reference) - 127.5).abs() < 1e-9);
        // The tied extremes rank at 25 and 75, interpolating into the
        // reference accordingly
        assert!((map_intensity(0, &source, &reference) - 63.75).abs() < 1e-9);
        assert!((map_intensity(255, &source, &reference) - 191.25).abs() < 1e-9);
    }

    #[test]
    fn test_build_truncates_toward_zero() {
        // Channel 0: source distribution [0, 0, 255, 255] against reference
        // [0, 85, 170, 255]; intensity 0 maps to 63.75 and must store as 63
        let source = make_image(
            2,
            2,
            &[[0, 0, 0], [0, 0, 0], [255, 255, 255], [255, 255, 255]],
        );
        let reference = make_image(
            2,
            2,
            &[[0, 0, 0], [85, 85, 85], [170, 170, 170], [255, 255, 255]],
        );

        let table = build_lookup_table(&source, &reference);

        assert_eq!(table.lookup(0, 0), 63);
        assert_eq!(table.lookup(0, 128), 127);
        assert_eq!(table.lookup(0, 255), 191);
    }

    #[test]
    fn test_build_is_deterministic() {
        let source = make_image(2, 2, &[[3, 30, 99], [7, 80, 99], [3, 30, 250], [9, 80, 250]]);
        let reference = make_image(
            2,
            2,
            &[[10, 0, 0], [20, 128, 64], [30, 255, 128], [40, 128, 192]],
        );

        let first = build_lookup_table(&source, &reference);
        let second = build_lookup_table(&source, &reference);

        assert_eq!(first, second);
    }

    #[test]
    fn test_channel_tables_are_monotonic() {
        let source = make_image(2, 2, &[[3, 30, 99], [7, 80, 99], [3, 30, 250], [9, 80, 250]]);
        let reference = make_image(
            2,
            2,
            &[[10, 0, 0], [20, 128, 64], [30, 255, 128], [40, 128, 192]],
        );

        let table = build_lookup_table(&source, &reference);

        // Percentile rank grows with intensity and percentile values grow
        // with rank, so every channel table is non-decreasing
        for channel in 0..TABLE_CHANNELS {
            let entries = table.channel_table(channel);
            for pair in entries.windows(2) {
                assert!(pair[0] <= pair[1], "channel {} not monotonic", channel);
            }
        }
    }

    #[test]
    fn test_remap_uses_per_channel_slices() {
        let source = make_image(
            2,
            2,
            &[[0, 0, 0], [0, 0, 0], [255, 255, 255], [255, 255, 255]],
        );
        let reference = make_image(
            2,
            2,
            &[[10, 20, 30], [10, 20, 30], [90, 80, 70], [90, 80, 70]],
        );

        let table = build_lookup_table(&source, &reference);

        let planes = [vec![0u8, 255], vec![255u8, 0], vec![0u8, 255]];
        let data = table.remap(&planes);

        assert_eq!(
            data,
            vec![
                table.lookup(0, 0),
                table.lookup(1, 255),
                table.lookup(2, 0),
                table.lookup(0, 255),
                table.lookup(1, 0),
                table.lookup(2, 255),
            ]
        );
    }
}
