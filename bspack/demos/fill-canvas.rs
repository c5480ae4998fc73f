use bspack::BspPacker;

fn main() {
    env_logger::init();

    let inputs: Vec<(u32, u32)> = (0..5).map(|i| (128 >> (i % 3), 128)).collect();

    let packer = BspPacker::new((256.0, 256.0)).margin(1.0);

    match packer.pack(inputs) {
        Ok(placements) => println!("Pack result: {:#?}", placements),
        Err(err) => println!("Pack failed: {} ({:?})", err, err.item()),
    }
}
