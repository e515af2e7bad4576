/// Expression-level if/else.  The border rules for a 3×3 kernel and
/// for the cost table's neighbour range read as a table once every
/// case fits on one line, which `cargo fmt` won't allow for a plain
/// `if`.
#[macro_export]
macro_rules! cq {
    ($condition: expr, $_true: expr, $_false: expr) => {
        if $condition {
            $_true
        } else {
            $_false
        }
    };
}
