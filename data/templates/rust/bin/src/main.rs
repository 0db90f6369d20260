fn main() {
    println!("Hello from @@NAME@@!");
}
