//! Walkthrough of the lattice surface: views with immediate visibility,
//! multi-dimensional indexing, extent info, and the explicit array
//! copy-back.

use lattice_dispatch::{parallel_for_each, Array, Domain, Index, Result, Shape, View};

fn main() -> Result<()> {
    let accel = Domain::Accelerator(0);

    // "Hello world" with every byte decremented; the dispatch restores it.
    let mut encoded: Vec<i32> = "Gdkkn".chars().map(|c| c as i32).collect();
    encoded.push(31);
    encoded.extend("vnqkc".chars().map(|c| c as i32));

    let line = Shape::new(&[encoded.len() as isize])?;
    {
        let view = View::wrap(line.clone(), &mut encoded)?;
        parallel_for_each(accel, &line, |idx| {
            view.set(&idx, view.get(&idx)? + 1)
        })?;
    }
    // Views share the host buffer, so the result is already here.
    let hello: String = encoded
        .iter()
        .filter_map(|&c| char::from_u32(c as u32))
        .collect();
    println!("{hello}");

    // Coordinate and flat access on a 2-D view.
    let mut grid = [4, 5, 6, 7, 8, 9];
    let two_d = View::wrap(Shape::new(&[2, 3])?, &mut grid)?;
    println!("grid(0,1) = {}", two_d.get(&Index::new(&[0, 1]))?); // 5
    println!("grid[5]   = {}", two_d.get_linear(5)?); // 9

    // A 3-D view: depth 2, rows 3, columns 4.
    let mut cube: Vec<i32> = (1..=24).collect();
    let three_d = View::wrap(Shape::new(&[2, 3, 4])?, &mut cube)?;
    println!("cube(0,1,3) = {}", three_d.get(&Index::new(&[0, 1, 3]))?); // 8
    println!(
        "extents: depth={} rows={} cols={}",
        three_d.dim(0)?,
        three_d.dim(1)?,
        three_d.dim(2)?
    );
    // Slicing off the leading dimension gives the second depth plane.
    let plane = three_d.slice(1)?;
    println!("plane(0,0) = {}", plane.get(&Index::new(&[0, 0]))?); // 13

    // Arrays deep-copy their source and need an explicit copy-back.
    let source = vec![0, 1, 2, 3, 4];
    let vector = Shape::new(&[5])?;
    let arr = Array::from_slice(vector.clone(), &source)?;

    let worker = arr.clone();
    parallel_for_each(accel, &vector, move |idx| {
        let v = worker.get(&idx)?;
        worker.set(&idx, v * v)
    })?;

    println!("source (unchanged): {source:?}");
    println!("materialized:       {:?}", arr.materialize());

    Ok(())
}
