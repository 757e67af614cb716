//! Two networks play noughts and crosses. The board, turn order and win
//! check live here; the networks only score the nine cells.

use rand::{rngs::StdRng, SeedableRng};
use ruminate_nn::{ranked_choice, Network, NetworkError, NetworkSpec};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Cell {
    Empty,
    X,
    O,
}

const LINES: [[usize; 3]; 8] = [
    [0, 1, 2], [3, 4, 5], [6, 7, 8],
    [0, 3, 6], [1, 4, 7], [2, 5, 8],
    [0, 4, 8], [2, 4, 6],
];

struct Board {
    cells: [Cell; 9],
}

impl Board {
    fn new() -> Self {
        Board { cells: [Cell::Empty; 9] }
    }

    /// +1 for the player to move, -1 for the opponent, 0 for empty.
    fn encode(&self, player: Cell) -> Vec<f64> {
        self.cells
            .iter()
            .map(|&c| match c {
                Cell::Empty => 0.0,
                c if c == player => 1.0,
                _ => -1.0,
            })
            .collect()
    }

    fn winner(&self) -> Option<Cell> {
        LINES.iter().find_map(|line| {
            let first = self.cells[line[0]];
            (first != Cell::Empty && line.iter().all(|&i| self.cells[i] == first)).then_some(first)
        })
    }

    fn take_turn(&mut self, network: &mut Network, player: Cell) -> Result<usize, NetworkError> {
        network.forward(&self.encode(player))?;
        let outputs = network.current_outputs()?;
        let cell = ranked_choice(&outputs, |i| self.cells[i] == Cell::Empty)?;
        self.cells[cell] = player;
        Ok(cell)
    }

    fn render(&self) -> String {
        self.cells
            .chunks(3)
            .map(|row| {
                row.iter()
                    .map(|c| match c {
                        Cell::Empty => '-',
                        Cell::X => 'X',
                        Cell::O => 'O',
                    })
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn main() -> Result<(), NetworkError> {
    env_logger::init();

    let mut rng = StdRng::seed_from_u64(1);
    let spec = NetworkSpec::new(9, vec![9], 9, 0);
    let mut crosses = spec.build(&mut rng)?;
    let mut noughts = spec.build(&mut rng)?;

    let mut board = Board::new();
    let mut player = Cell::X;
    loop {
        let network = if player == Cell::X { &mut crosses } else { &mut noughts };
        match board.take_turn(network, player) {
            Ok(cell) => println!("{player:?} takes cell {cell}"),
            Err(NetworkError::NoValidSelection) => {
                println!("Board is full: draw");
                break;
            }
            Err(err) => return Err(err),
        }
        if let Some(winner) = board.winner() {
            println!("{winner:?} wins");
            break;
        }
        player = if player == Cell::X { Cell::O } else { Cell::X };
    }

    println!("{}", board.render());
    Ok(())
}
