//! Plotting of the aligner's matrices, for inspecting how a dynamic
//! programme unfolded.
//!
//! A [`MatrixPlotter`] receives the cell scores, the per-cell return-path
//! arrows and the accumulated scores of one alignment; the provided
//! `plot_*` methods walk the windowed matrices and feed every in-band cell
//! to the implementation's hooks. [`GnuplotMatrixPlotter`] renders them as
//! a gnuplot script plus a data file.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use crate::{
    Error, Result, ReturnPathMatrix, Score, ScoreAccumulationMatrix, ScoreSource,
};

/// A sink for the cells of one alignment's matrices.
///
/// Coordinates arrive in graph order (x along the second sequence, y along
/// the first), matching how the matrices are conventionally drawn.
pub trait MatrixPlotter {
    /// The number of rows the plot expects.
    fn length_a(&self) -> usize;

    /// The number of columns the plot expects.
    fn length_b(&self) -> usize;

    /// Receives the full grid of pair scores.
    fn plot_score_grid(&mut self, scores: Vec<Vec<f64>>);

    /// Receives one non-zero pair score at a cell centre.
    fn write_centre_score(&mut self, x: usize, y: usize, score: f64);

    /// Receives one accumulated score at a cell corner.
    fn write_corner_score(&mut self, x: usize, y: usize, score: f64);

    /// Receives one return-path arrow between cell corners.
    fn plot_corner_arrow(&mut self, from_x: usize, from_y: usize, to_x: usize, to_y: usize);

    /// Checks that a matrix to be plotted has the expected shape.
    ///
    /// # Errors
    ///
    /// `InvalidShape` on a mismatch.
    fn check_lengths_match(&self, length_a: usize, length_b: usize) -> Result<()> {
        if length_a != self.length_a() || length_b != self.length_b() {
            return Err(Error::InvalidShape(format!(
                "cannot plot a {length_a} x {length_b} matrix in a {} x {} plot",
                self.length_a(),
                self.length_b()
            )));
        }
        Ok(())
    }

    /// Plots the pair scores of the score source, marking the non-zero
    /// ones.
    ///
    /// # Errors
    ///
    /// `InvalidShape` if the source's shape differs from the plot's.
    fn plot_scores<S: ScoreSource>(&mut self, scorer: &S) -> Result<()> {
        self.check_lengths_match(scorer.length_a(), scorer.length_b())?;
        let mut grid = vec![vec![0.0; scorer.length_b()]; scorer.length_a()];
        for (index_a, row) in grid.iter_mut().enumerate() {
            for (index_b, cell) in row.iter_mut().enumerate() {
                let score = f64::from(scorer.score(index_a, index_b));
                *cell = score;
                if score > 0.0 {
                    // Flipped into graph order: x along b, y along a.
                    self.write_centre_score(index_b, index_a, score);
                }
            }
        }
        self.plot_score_grid(grid);
        Ok(())
    }

    /// Plots every stored return-path step as an arrow towards its
    /// successor.
    ///
    /// # Errors
    ///
    /// `InvalidShape` if the matrix's shape differs from the plot's;
    /// `InvalidIndex` cannot occur for a matrix populated by the aligner.
    fn plot_return_path(&mut self, return_path: &ReturnPathMatrix) -> Result<()> {
        self.check_lengths_match(return_path.length_a(), return_path.length_b())?;
        for index_a in 0..return_path.length_a() {
            let (b_start, b_stop) = return_path.b_window_start_and_stop_for_a(index_a);
            for index_b in b_start..=b_stop {
                let step = return_path.get_step_towards_end(index_a, index_b)?;
                let (next_a, next_b) = step.indices_after(index_a, index_b);
                self.plot_corner_arrow(index_b, index_a, next_b, next_a);
            }
        }
        Ok(())
    }

    /// Plots the accumulated best-score-to-end of every in-band cell.
    ///
    /// # Errors
    ///
    /// `InvalidShape` if the matrix's shape differs from the plot's.
    fn plot_accumulated_scores(&mut self, accumulated: &ScoreAccumulationMatrix) -> Result<()> {
        self.check_lengths_match(accumulated.length_a(), accumulated.length_b())?;
        for index_b in 0..accumulated.length_b() {
            for index_a in 0..accumulated.length_a() {
                let score: Score = accumulated.score_towards_end(index_a, index_b);
                self.write_corner_score(index_b, index_a, f64::from(score));
            }
        }
        Ok(())
    }
}

/// A [`MatrixPlotter`] that renders to a gnuplot script with a matrix data
/// file alongside it.
#[derive(Clone, Debug)]
#[must_use]
pub struct GnuplotMatrixPlotter {
    /// The number of rows.
    length_a: usize,
    /// The number of columns.
    length_b: usize,
    /// The accumulated gnuplot commands emitted before the plot line.
    preplot_commands: String,
    /// The label counter gnuplot requires to be distinct.
    counter: usize,
    /// The score grid, written to the data file.
    scores: Vec<Vec<f64>>,
}

impl GnuplotMatrixPlotter {
    /// Creates a plotter for a matrix of the given shape.
    pub const fn new(length_a: usize, length_b: usize) -> Self {
        Self {
            length_a,
            length_b,
            preplot_commands: String::new(),
            counter: 0,
            scores: Vec::new(),
        }
    }

    /// The font/line scale that keeps annotations legible as matrices
    /// grow.
    fn scale(&self, base: f64) -> f64 {
        base / (self.length_a.max(self.length_b) + 1) as f64
    }

    /// Writes the gnuplot script to `<stem>.gnuplot` and the score grid to
    /// `<stem>.data.txt`.
    ///
    /// # Errors
    ///
    /// `Io` on write failure.
    pub fn finish(&self, output_stem: &Path) -> Result<()> {
        let gnuplot_file = output_stem.with_extension("gnuplot");
        let eps_file = output_stem.with_extension("eps");
        let data_file = output_stem.with_extension("data.txt");

        let mut script = String::new();
        let _ = writeln!(script, "set   terminal postscript color");
        let _ = writeln!(script, "set   output \"{}\"", eps_file.display());
        let _ = writeln!(
            script,
            "set   size ratio {}",
            self.length_a as f64 / self.length_b as f64
        );
        let _ = writeln!(script, "set   palette defined (0 \"white\", 1 0.1 0.1 0.1)");
        let _ = writeln!(script, "set   autoscale x2fix");
        let _ = writeln!(script, "set   autoscale yfix");
        let _ = writeln!(script, "set   x2tics 1 rotate font \", {}\"", self.scale(350.0));
        let _ = writeln!(script, "set   ytics  1 rotate font \", {}\"", self.scale(350.0));
        let _ = writeln!(script, "set   tics scale 0,0.001");
        let _ = writeln!(script, "unset xtics");
        let _ = writeln!(script, "set   mx2tics 2");
        let _ = writeln!(script, "set   mytics  2");
        let _ = writeln!(script, "unset colorbox");
        let _ = writeln!(script, "set   yrange [] reverse");
        let _ = writeln!(
            script,
            "set   grid front mx2tics mytics linewidth {} lt -1 lc rgb 'white'",
            self.scale(20.0)
        );
        script.push_str(&self.preplot_commands);
        let _ = writeln!(
            script,
            "plot \"{}\" matrix with image notitle",
            data_file.display()
        );

        let mut data = String::new();
        for row in &self.scores {
            let rendered: Vec<String> = row.iter().map(ToString::to_string).collect();
            let _ = writeln!(data, "{}", rendered.join(" "));
        }

        fs::write(&gnuplot_file, script)?;
        fs::write(&data_file, data)?;
        Ok(())
    }
}

impl MatrixPlotter for GnuplotMatrixPlotter {
    fn length_a(&self) -> usize {
        self.length_a
    }

    fn length_b(&self) -> usize {
        self.length_b
    }

    fn plot_score_grid(&mut self, scores: Vec<Vec<f64>>) {
        self.scores = scores;
    }

    fn write_centre_score(&mut self, x: usize, y: usize, score: f64) {
        let _ = writeln!(
            self.preplot_commands,
            "set label {} \"{score}\" at first {x}, {y} centre front textcolor rgbcolor \"black\" nopoint font \", {}\"",
            self.counter,
            self.scale(50.0)
        );
        self.counter += 1;
    }

    fn write_corner_score(&mut self, x: usize, y: usize, score: f64) {
        let _ = writeln!(
            self.preplot_commands,
            "set label {} \"{score}\" at first {}, {} centre front textcolor rgbcolor \"black\" nopoint offset first 0.200, -0.085 font \", {}\"",
            self.counter,
            x as f64 - 0.5,
            y as f64 - 0.5,
            self.scale(50.0)
        );
        self.counter += 1;
    }

    fn plot_corner_arrow(&mut self, from_x: usize, from_y: usize, to_x: usize, to_y: usize) {
        let _ = writeln!(
            self.preplot_commands,
            "set   arrow from {}, {} to {}, {} size 0.20, 15 front head filled linewidth {}",
            from_x as f64 - 0.5,
            from_y as f64 - 0.5,
            to_x as f64 - 0.5,
            to_y as f64 - 0.5,
            self.scale(10.0)
        );
    }
}

#[cfg(test)]
mod tests {
    use super::{GnuplotMatrixPlotter, MatrixPlotter};
    use crate::{Result, SequenceScoreSource};

    #[test]
    fn shape_mismatches_are_rejected() {
        let scorer = SequenceScoreSource::from_strs("ABC", "ABCD");
        let mut plotter = GnuplotMatrixPlotter::new(3, 3);
        assert!(plotter.plot_scores(&scorer).is_err());
    }

    #[test]
    fn matching_cells_become_labels() -> Result<()> {
        let scorer = SequenceScoreSource::from_strs("AB", "AB");
        let mut plotter = GnuplotMatrixPlotter::new(2, 2);
        plotter.plot_scores(&scorer)?;
        // The two diagonal matches are labelled; the off-diagonal zeros
        // are not.
        assert_eq!(plotter.preplot_commands.matches("set label").count(), 2);
        assert_eq!(plotter.scores, vec![vec![1.0, 0.0], vec![0.0, 1.0]]);
        Ok(())
    }
}
