use std::fmt::Write as _;
use std::fs;
use watershell::core::io::bgf::BgfFile;
use watershell::core::io::table::ShellTableWriter;
use watershell::core::io::traits::TrajectoryFile;
use watershell::engine::config::{ExtractionConfigBuilder, ShellMode};
use watershell::engine::error::EngineError;
use watershell::engine::progress::ProgressReporter;
use watershell::workflows::oo_distances;

fn atom_line(serial: usize, name: &str, res: &str, resid: usize, pos: [f64; 3]) -> String {
    format!(
        "{:<6} {:>5} {:<5} {:>3} {:1} {:>5}{:>10.5}{:>10.5}{:>10.5} {:<5}{:>3}{:>2} {:>8.5}",
        "HETATM", serial, name, res, "W", resid, pos[0], pos[1], pos[2], "OW", 2, 0, 0.0
    )
}

/// A BGF trajectory of `n_waters` three-site waters on a line plus one chloride.
/// Frame `f` spaces the oxygens `2.5 + f` apart.
fn write_trajectory(n_waters: usize, n_frames: usize) -> String {
    let mut content = String::new();
    for frame in 0..n_frames {
        writeln!(content, "BIOGRF 200").unwrap();
        writeln!(content, "REMARK frame {}", frame).unwrap();
        let spacing = 2.5 + frame as f64;
        let mut serial = 1;
        for w in 0..n_waters {
            let x = w as f64 * spacing;
            for (name, dx, dy) in [("O", 0.0, 0.0), ("H1", 0.96, 0.0), ("H2", -0.24, 0.93)] {
                writeln!(content, "{}", atom_line(serial, name, "HOH", w + 1, [x + dx, dy, 0.0])).unwrap();
                serial += 1;
            }
        }
        writeln!(content, "{}", atom_line(serial, "CL", "CL", 900, [0.0, 10.0, 0.0])).unwrap();
        writeln!(content, "END").unwrap();
    }
    content
}

#[test]
fn bgf_trajectory_produces_both_shell_table() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("waters.bgf");
    let output = dir.path().join("shells.csv");
    fs::write(&input, write_trajectory(6, 2)).unwrap();

    let trajectory = BgfFile::read_from_path(&input).unwrap();
    assert_eq!(trajectory.n_frames(), 2);
    assert_eq!(trajectory.n_atoms(), 19);

    let config = ExtractionConfigBuilder::new()
        .mode(ShellMode::BothShells)
        .build()
        .unwrap();
    let result = oo_distances::run(&trajectory, &config, &ProgressReporter::new()).unwrap();

    assert_eq!(result.oxygen_serials, vec![1, 4, 7, 10, 13, 16]);
    assert_eq!(result.distances.shape(), (2, 6, 20));
    let first_shell = &result.distances.row(1, 0)[..4];
    assert!(first_shell.iter().zip([3.5, 7.0, 10.5, 14.0]).all(|(a, b)| (a - b).abs() < 1e-9));

    ShellTableWriter::create(&output)
        .unwrap()
        .write(&result.distances, &result.oxygen_serials)
        .unwrap();

    let table = fs::read_to_string(&output).unwrap();
    let lines: Vec<&str> = table.lines().collect();
    assert_eq!(lines.len(), 1 + 2 * 6);
    assert!(lines[0].starts_with("frame,water,oxygen_serial,d1,"));
    assert!(lines[0].ends_with(",d20"));
    assert!(lines[1].starts_with("0,0,1,2.5,5,7.5,10,"));
    assert!(lines[12].starts_with("1,5,16,"));
}

#[test]
fn all_mode_on_bgf_trajectory_sorts_every_row() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("waters.bgf");
    fs::write(&input, write_trajectory(3, 1)).unwrap();

    let trajectory = BgfFile::read_from_path(&input).unwrap();
    let config = ExtractionConfigBuilder::new().mode(ShellMode::All).build().unwrap();
    let result = oo_distances::run(&trajectory, &config, &ProgressReporter::new()).unwrap();

    assert_eq!(result.distances.shape(), (1, 3, 2));
    for (_, _, row) in result.distances.rows() {
        assert!(row.windows(2).all(|pair| pair[0] <= pair[1]));
        assert!(row.iter().all(|&d| d > 0.0));
    }
}

#[test]
fn shell_mode_on_small_trajectory_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("waters.bgf");
    fs::write(&input, write_trajectory(3, 1)).unwrap();

    let trajectory = BgfFile::read_from_path(&input).unwrap();
    let config = ExtractionConfigBuilder::new()
        .mode(ShellMode::SecondShell)
        .build()
        .unwrap();
    let result = oo_distances::run(&trajectory, &config, &ProgressReporter::new());

    assert!(matches!(
        result,
        Err(EngineError::InsufficientShellSize { waters: 3, .. })
    ));
}
