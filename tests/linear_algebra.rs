/* ************************************************************************ **
** This file is part of dlin, and is licensed under EITHER the MIT license  **
** or the Apache 2.0 license, at your option.                               **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

#[macro_use] extern crate dlin_assert_close;

use ::dlin::config::{Settings, YamlRead};
use ::dlin::{Matrix, Vector, Qrp};
use ::rand::Rng;

fn random_matrix(rng: &mut impl Rng, nrows: usize, ncols: usize) -> Matrix {
    let data = (0..nrows * ncols).map(|_| rng.gen_range(-10.0..10.0)).collect();
    Matrix::from_column_major(nrows, ncols, data).unwrap()
}

fn random_vector(rng: &mut impl Rng, len: usize) -> Vector {
    (0..len).map(|_| rng.gen_range(-10.0..10.0)).collect()
}

#[test]
fn qrp_reconstruction() {
    let mut rng = ::rand::thread_rng();
    for _ in 0..50 {
        let (m, n) = (rng.gen_range(1..12), rng.gen_range(1..12));
        let a = random_matrix(&mut rng, m, n);
        let Qrp { q, r, pivot } = ::dlin::decompose_qrp(&a).unwrap();

        assert_close!(abs=1e-10, (&q * &r).project(pivot.inverse()).unwrap(), a);

        // magnitudes on the diagonal of R never increase
        let diag = r.diag();
        for k in 1..diag.len() {
            assert!(diag[k].abs() <= diag[k - 1].abs() * (1.0 + 1e-12));
        }
    }
}

#[test]
fn qrp_of_rank_deficient_input() {
    let mut rng = ::rand::thread_rng();
    let half = random_matrix(&mut rng, 6, 2);
    // columns 2 and 3 repeat columns 0 and 1
    let a = half.project(::dlin::ids![0, 1, 0, 1]).unwrap();
    let Qrp { q, r, pivot } = ::dlin::decompose_qrp(&a).unwrap();
    assert_close!(abs=1e-10, (&q * &r).project(&pivot.inverse()).unwrap(), a);
    assert_close!(abs=1e-10, r.get(2, 2).unwrap(), 0.0);
}

#[test]
fn eigen_reconstruction() {
    let mut rng = ::rand::thread_rng();
    for _ in 0..50 {
        let n = rng.gen_range(1..10);
        let b = random_matrix(&mut rng, n, n);
        let a = &b + &b.t();

        let (values, vectors) = ::dlin::eigen_system_symmetric(&a).unwrap();
        let reconstructed = &(&vectors * &Matrix::from_diag(&values)) * &vectors.t();
        assert_close!(abs=1e-9, reconstructed, a);
        assert_close!(abs=1e-10, &vectors.t() * &vectors, Matrix::identity(n));
        assert_close!(abs=1e-10, ::dlin::eigen_values_symmetric(&a).unwrap(), values);
    }
}

#[test]
fn weighted_least_squares_matches_scaled_problem() {
    let mut rng = ::rand::thread_rng();
    for _ in 0..20 {
        let n = rng.gen_range(1..5);
        let m = n + rng.gen_range(2..10);
        let a = random_matrix(&mut rng, m, n);
        let y = random_vector(&mut rng, m);
        let w: Vector = (0..m).map(|_| rng.gen_range(0.5..2.0)).collect();

        let expected = {
            let sqrt_w = w.power_elements(0.5);
            ::dlin::solve_linear_equation(&a.mul_rows(&sqrt_w).unwrap(), &(&y * &sqrt_w)).unwrap()
        };
        let actual = ::dlin::solve_weighted_least_squares(&y, &a, Some(w.view())).unwrap();
        assert_close!(rel=1e-9, abs=1e-10, actual, expected);

        // normal equations hold for the weighted residual
        let residual = &y - &a.mul_vector(&actual).unwrap().into_vector();
        let gradient = &(&residual * &w) * &a;
        assert_close!(abs=1e-8, gradient, Vector::new(n));
    }
}

#[test]
fn multiple_weighted_least_squares_is_column_by_column() {
    let mut rng = ::rand::thread_rng();
    let a = random_matrix(&mut rng, 8, 3);
    let ys = random_matrix(&mut rng, 8, 4);
    let mut ws = random_matrix(&mut rng, 8, 4);
    ws.power_elements_mut(2.0);

    let xs = ::dlin::solve_multiple_weighted_least_squares(&ys, &a, Some(&ws)).unwrap();
    assert_eq!(xs.dims(), (3, 4));
    for j in 0..4 {
        let x = ::dlin::solve_weighted_least_squares(&ys.column(j).unwrap(), &a, ws.column(j).ok()).unwrap();
        assert_close!(rel=1e-12, abs=1e-14, xs.column(j).unwrap().copy(), x);
    }
}

#[test]
fn settings_feed_the_solver() {
    let settings = Settings::from_reader("least-squares:\n  rcond: 0.1\n".as_bytes()).unwrap();
    let settings = settings.validate().unwrap();

    let a = Matrix::from_rows(&[[1.0, 0.0], [0.0, 1e-3]]).unwrap();
    let b = ::dlin::vector![1, 1e-3];
    let x = ::dlin::solve_linear_equation_with(&settings.least_squares, &a, &b).unwrap();
    assert_close!(abs=1e-12, x, ::dlin::vector![1, 0]);
}

#[test]
fn tabular_round_trip() {
    use ::dlin::Cell;

    let table = vec![
        vec![Cell::from(1.0), Cell::from(true)],
        vec![Cell::from("2.5"), Cell::from(false)],
    ];
    let m = Matrix::from_records(&table).unwrap();
    let records = m.to_records(None).unwrap();
    assert_eq!(records[1]["V0"], 2.5);
    assert_eq!(records[0]["V1"], 1.0);

    let back: Vec<Vec<Cell>> = records.iter()
        .map(|r| r.values().map(|&x| Cell::from(x)).collect())
        .collect();
    assert_eq!(Matrix::from_records(&back).unwrap(), m);
}
