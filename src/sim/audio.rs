/// Wall-bump feedback tone.
///
/// A square wave written straight into the codec FIFO. The call is
/// synchronous: it clears the FIFO, then runs a fixed iteration budget,
/// writing one stereo sample per iteration only while the FIFO reports
/// enough free slots. If space never frees up the loop just runs out.

use crate::hal::{audio_free_slots, Peripherals, AUDIO_CLEAR_FIFOS};

/// Loop iterations per tone.
pub const BOOP_ITERATIONS: u32 = 5000;
pub const BOOP_AMPLITUDE: i32 = 100_000;
/// Samples per square-wave cycle.
pub const BOOP_CYCLE: u32 = 20;
/// Write only while more than this many slots are free.
pub const MIN_FREE_SLOTS: u32 = 20;

/// Play the tone. Returns the number of samples written.
pub fn play_wall_boop<P: Peripherals>(board: &mut P) -> u32 {
    board.audio_control(AUDIO_CLEAR_FIFOS);
    board.audio_control(0);

    let mut written = 0;
    for i in 0..BOOP_ITERATIONS {
        if audio_free_slots(board.audio_status()) > MIN_FREE_SLOTS {
            let sample = if i % BOOP_CYCLE > BOOP_CYCLE / 2 {
                BOOP_AMPLITUDE
            } else {
                -BOOP_AMPLITUDE
            };
            board.write_audio_sample(sample, sample);
            written += 1;
        }
    }
    tracing::trace!(written, "wall boop");
    written
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hal::memory::MemoryBoard;

    #[test]
    fn fills_fifo_down_to_threshold_then_stops() {
        let mut board = MemoryBoard::with_fifo_depth(128);
        let written = play_wall_boop(&mut board);
        assert_eq!(written, 128 - MIN_FREE_SLOTS);
        assert_eq!(board.fifo_len(), (128 - MIN_FREE_SLOTS) as usize);
        assert_eq!(board.samples_dropped(), 0);
        assert_eq!(board.fifo_clears(), 1);
    }

    #[test]
    fn waveform_alternates_sign() {
        let mut board = MemoryBoard::with_fifo_depth(255);
        play_wall_boop(&mut board);
        let samples = board.drain_audio(BOOP_CYCLE as usize * 2);
        // first half-cycle low, then high
        assert_eq!(samples[0], (-BOOP_AMPLITUDE, -BOOP_AMPLITUDE));
        assert_eq!(samples[11], (BOOP_AMPLITUDE, BOOP_AMPLITUDE));
        assert_eq!(samples[20], (-BOOP_AMPLITUDE, -BOOP_AMPLITUDE));
        assert!(samples.iter().all(|&(l, r)| l == r && l.abs() == BOOP_AMPLITUDE));
    }

    #[test]
    fn full_fifo_spins_out_without_writing() {
        let mut board = MemoryBoard::with_fifo_depth(MIN_FREE_SLOTS as usize);
        assert_eq!(play_wall_boop(&mut board), 0);
        assert_eq!(board.samples_accepted(), 0);
    }

    #[test]
    fn clear_discards_stale_samples() {
        let mut board = MemoryBoard::with_fifo_depth(128);
        play_wall_boop(&mut board);
        play_wall_boop(&mut board);
        assert_eq!(board.fifo_clears(), 2);
        assert_eq!(board.fifo_len(), (128 - MIN_FREE_SLOTS) as usize);
    }
}
