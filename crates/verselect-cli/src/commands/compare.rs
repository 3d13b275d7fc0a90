//! Handler for `verselect compare`.

use std::cmp::Ordering;

use miette::Result;
use verselect_resolver::VersionComparator;

pub fn exec(a: &str, b: &str) -> Result<()> {
    let symbol = match VersionComparator::new().compare_str(a, b) {
        Ordering::Less => "<",
        Ordering::Equal => "=",
        Ordering::Greater => ">",
    };
    println!("{a} {symbol} {b}");
    Ok(())
}
