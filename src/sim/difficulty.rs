//! Score-driven difficulty ratchet
//!
//! The scroll speed is the sole difficulty knob: it feeds every spawn
//! interval and the obstacle approach speed. It only ever increases
//! within a run.

use crate::consts::{SPEED_FLASH_TICKS, SPEEDUP_EVERY, SPEEDUP_FACTOR};

use super::state::{GameEvent, GameState};

/// Called after every score change (not every tick). Each time the score
/// lands on a multiple of `SPEEDUP_EVERY`, the scroll speed ratchets up
/// and the cosmetic flash window opens.
pub fn on_score_changed(state: &mut GameState) {
    if state.score == 0 || !state.score.is_multiple_of(SPEEDUP_EVERY) {
        return;
    }
    state.scroll_speed *= SPEEDUP_FACTOR;
    state.speed_flash_ticks = SPEED_FLASH_TICKS;
    state.push_event(GameEvent::SpeedIncreased {
        scroll_speed: state.scroll_speed,
    });
    log::debug!("speed increased to {:.2} px/tick at score {}", state.scroll_speed, state.score);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::BASE_SCROLL_SPEED;

    #[test]
    fn ratchets_on_every_fifth_point() {
        let mut state = GameState::new(1, 1280.0, 720.0);
        state.start(1);

        let mut expected = BASE_SCROLL_SPEED;
        for score in 1..=17u32 {
            state.score = score;
            on_score_changed(&mut state);
            if score % 5 == 0 {
                expected *= SPEEDUP_FACTOR;
            }
            assert_eq!(state.scroll_speed, expected, "at score {score}");
        }
        // Three crossings: 5, 10, 15
        let mut by_hand = BASE_SCROLL_SPEED;
        for _ in 0..3 {
            by_hand *= SPEEDUP_FACTOR;
        }
        assert_eq!(state.scroll_speed, by_hand);
    }

    #[test]
    fn speed_never_decreases() {
        let mut state = GameState::new(1, 1280.0, 720.0);
        state.start(1);
        let mut last = state.scroll_speed;
        for score in 1..=40u32 {
            state.score = score;
            on_score_changed(&mut state);
            assert!(state.scroll_speed >= last);
            last = state.scroll_speed;
        }
    }

    #[test]
    fn flash_window_and_event_on_crossing() {
        let mut state = GameState::new(1, 1280.0, 720.0);
        state.start(1);
        state.take_events();

        state.score = 4;
        on_score_changed(&mut state);
        assert_eq!(state.speed_flash_ticks, 0);
        assert!(state.take_events().is_empty());

        state.score = 5;
        on_score_changed(&mut state);
        assert_eq!(state.speed_flash_ticks, SPEED_FLASH_TICKS);
        assert!(matches!(
            state.take_events().as_slice(),
            [GameEvent::SpeedIncreased { .. }]
        ));
    }

    #[test]
    fn score_zero_does_not_ratchet() {
        let mut state = GameState::new(1, 1280.0, 720.0);
        state.start(1);
        on_score_changed(&mut state);
        assert_eq!(state.scroll_speed, BASE_SCROLL_SPEED);
    }
}
