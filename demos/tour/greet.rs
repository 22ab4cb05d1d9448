fn main() {
    greet();
}

fn greet() {
    println!("Hello, world!");
}
