use avl_engine::{AvlTree, Error};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Error> {
    // RUST_LOG=avl_engine=trace shows every rotation
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut tree = AvlTree::new();
    for key in [10, 20, 30, 40, 50, 25] {
        tree.insert(key, format!("value {key}"))?;
    }

    println!("Tree:");
    tree.print();
    println!();

    println!("In-order:    {:?}", tree.in_order_traversal());
    println!("Pre-order:   {:?}", tree.pre_order_traversal());
    println!("Post-order:  {:?}", tree.post_order_traversal());
    println!("Level-order: {:?}", tree.level_order_traversal());
    println!("Height: {}, keys: {}", tree.height(), tree.num_keys());

    if let Err(err) = tree.insert(20, "again".to_string()) {
        println!("insert 20 again: {err}");
    }

    tree.remove(&30)?;
    println!("After removing 30, root is {:?}", tree.key_at_root());
    println!("{tree:?}");
    Ok(())
}
