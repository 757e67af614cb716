use rand::{rngs::StdRng, SeedableRng};
use ruminate_nn::{train_loop, NetworkError, NetworkSpec, TrainConfig};

fn main() -> Result<(), NetworkError> {
    env_logger::init();

    let mut rng = StdRng::seed_from_u64(7);
    let mut spec = NetworkSpec::new(2, vec![4], 2, 2);
    spec.learning_rate = 0.3;
    spec.init_range = 0.5;
    let mut network = spec.build(&mut rng)?;

    // Two outputs, one per class, so misclassified samples can be remembered.
    let inputs = vec![
        vec![1.0, 0.0],
        vec![1.0, 1.0],
        vec![0.0, 1.0],
        vec![0.0, 0.0],
    ];
    let expected_outputs = vec![
        vec![0.0, 1.0],
        vec![1.0, 0.0],
        vec![0.0, 1.0],
        vec![1.0, 0.0],
    ];

    let history = train_loop(&mut network, &inputs, &expected_outputs, &TrainConfig::new(2000), &mut rng)?;

    for stats in history.iter().step_by(200) {
        println!(
            "Epoch {}: loss = {:.6}, accuracy = {:.2}, memory streaks = {:.2}",
            stats.epoch, stats.train_loss, stats.accuracy, stats.memory_mean_streak
        );
    }

    for input in &inputs {
        network.forward(input)?;
        println!("Input: {:?} -> XOR = {}", input, network.favored_neuron()?);
    }
    println!("Memory success streaks: {:?}", network.solution_counts());

    Ok(())
}
