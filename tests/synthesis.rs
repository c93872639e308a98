use approx::assert_relative_eq;
use murmur::dsp::{BrownNoiseGenerator, FilterState, OnePoleLowpass, SynthParams};
use murmur::util::analysis;

const SR: f64 = 44100.0;
const FRAMES: usize = 4410;
const CHANNELS: usize = 2;

fn params(alpha: f64) -> SynthParams {
    SynthParams { alpha, ..SynthParams::default() }
}

fn render_buffers(
    generator: &mut BrownNoiseGenerator,
    params: SynthParams,
    count: usize,
) -> Vec<Vec<i16>> {
    (0..count)
        .map(|_| {
            let mut block = vec![0; FRAMES * CHANNELS];
            generator.process_block(&mut block, CHANNELS, params);
            block
        })
        .collect()
}

#[test]
fn fixed_seed_is_bit_identical() {
    let a = render_buffers(&mut BrownNoiseGenerator::with_seed(1234, SR), params(0.01), 3);
    let b = render_buffers(&mut BrownNoiseGenerator::with_seed(1234, SR), params(0.01), 3);
    let c = render_buffers(&mut BrownNoiseGenerator::with_seed(4321, SR), params(0.01), 3);

    assert_eq!(a, b);
    assert_ne!(a, c);
}

#[test]
fn buffers_join_without_a_step() {
    let mut generator = BrownNoiseGenerator::with_seed(99, SR);
    let buffers = render_buffers(&mut generator, params(0.01), 2);

    let last = buffers[0][buffers[0].len() - 1];
    let first = buffers[1][0];

    assert!(
        (i32::from(last) - i32::from(first)).abs() <= 500,
        "jump of {} across the boundary",
        i32::from(last) - i32::from(first)
    );
}

#[test]
fn block_size_does_not_change_the_signal() {
    let mut whole = BrownNoiseGenerator::with_seed(5, SR);
    let mut split = BrownNoiseGenerator::with_seed(5, SR);

    let mut one = vec![0; 1000 * CHANNELS];
    whole.process_block(&mut one, CHANNELS, params(0.02));

    let mut two = vec![0; 1000 * CHANNELS];
    let (head, tail) = two.split_at_mut(300 * CHANNELS);
    split.process_block(head, CHANNELS, params(0.02));
    split.process_block(tail, CHANNELS, params(0.02));

    assert_eq!(one, two);
    assert_eq!(whole.filter_state(), split.filter_state());
}

#[test]
fn stays_centred_over_ten_buffers() {
    let mut generator = BrownNoiseGenerator::with_seed(2024, SR);
    let all: Vec<i16> = render_buffers(&mut generator, params(0.01), 10)
        .into_iter()
        .flatten()
        .collect();

    let (mean, std_dev) = analysis::mean_and_std_dev(&all, CHANNELS);

    assert!(mean.abs() <= 2000.0, "mean drifted to {mean}");
    assert!(std_dev > 100.0, "signal is nearly silent ({std_dev})");
}

#[test]
fn zero_crossing_rate_is_low() {
    let mut generator = BrownNoiseGenerator::with_seed(8, SR);
    let buffer = &render_buffers(&mut generator, params(0.01), 2)[1];

    let zcr = analysis::zero_crossing_rate(buffer, CHANNELS);
    assert!((0.001..=0.2).contains(&zcr), "zero-crossing rate {zcr}");
}

#[test]
fn loud_volume_saturates_symmetrically() {
    let mut generator = BrownNoiseGenerator::with_seed(3, SR);
    let loud = SynthParams { alpha: 1.0, pitch_hz: 0.0, volume: 50.0 };
    let buffer = &render_buffers(&mut generator, loud, 1)[0];

    let (min, max) = analysis::min_max(buffer, CHANNELS).unwrap();
    assert_eq!(min, i16::MIN);
    assert_eq!(max, i16::MAX);
}

#[test]
fn zero_pitch_matches_no_tone() {
    let mut with_tone = BrownNoiseGenerator::with_seed(17, SR);
    let mut without = BrownNoiseGenerator::with_seed(17, SR).without_tone();

    assert_eq!(
        render_buffers(&mut with_tone, params(0.05), 2),
        render_buffers(&mut without, params(0.05), 2)
    );
}

#[test]
fn filter_matches_the_recurrence() {
    let filter = OnePoleLowpass::new(0.25);
    let mut state = FilterState::new();

    let mut expected = 0.0;
    for x in [1.0, -0.5, 0.25, 0.75, -1.0] {
        expected = 0.25 * x + 0.75 * expected;
        assert_relative_eq!(filter.process(&mut state, x), expected, epsilon = 1e-12);
    }

    assert_relative_eq!(state.last_sample(), expected, epsilon = 1e-12);
}

#[test]
fn generators_on_separate_threads_stay_independent() {
    let seeds: Vec<u64> = (100..108).collect();

    let expected: Vec<Vec<Vec<i16>>> = seeds
        .iter()
        .map(|&seed| {
            render_buffers(&mut BrownNoiseGenerator::with_seed(seed, SR), params(0.01), 4)
        })
        .collect();

    let handles: Vec<_> = seeds
        .iter()
        .map(|&seed| {
            std::thread::spawn(move || {
                let mut generator = BrownNoiseGenerator::with_seed(seed, SR);
                render_buffers(&mut generator, params(0.01), 4)
            })
        })
        .collect();

    for (handle, expected) in handles.into_iter().zip(&expected) {
        assert_eq!(&handle.join().unwrap(), expected);
    }
}
