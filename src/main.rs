use std::env;
use std::process;

use rustyjs8::constants::{Mode, NN};
use rustyjs8::{decoder, encoder, modulation, tracing_init, wav};

fn usage(program: &str) -> ! {
    eprintln!("Usage: {} encode <message> [frame_type] [out.wav]", program);
    eprintln!("       {} decode <in.wav>", program);
    process::exit(1);
}

fn main() {
    tracing_init::init_tracing();

    let args: Vec<String> = env::args().collect();
    if args.len() < 3 {
        usage(&args[0]);
    }

    match args[1].as_str() {
        "encode" => {
            let message = &args[2];
            let frame_type: u8 = args
                .get(3)
                .map(|s| s.parse().unwrap_or(0))
                .unwrap_or(0);

            let tones = match encoder::encode(message, frame_type) {
                Ok(tones) => tones,
                Err(err) => {
                    eprintln!("encode failed: {}", err);
                    process::exit(1);
                }
            };

            println!("Message: {:?}", message);
            println!("Type:    {}", frame_type);
            print_tones(&tones);

            if let Some(path) = args.get(4) {
                let samples = modulation::waveform(&tones, 1500.0, 12000, Mode::Normal);
                if let Err(err) = wav::write_wav(path, &samples, 12000) {
                    eprintln!("failed to write {}: {}", path, err);
                    process::exit(1);
                }
                println!("Wrote {} samples to {}", samples.len(), path);
            }
        }
        "decode" => {
            let (samples, sample_rate) = match wav::read_wav(&args[2]) {
                Ok(read) => read,
                Err(err) => {
                    eprintln!("failed to read {}: {}", args[2], err);
                    process::exit(1);
                }
            };

            let mut decoder = match decoder::Decoder::new(sample_rate, Mode::Normal) {
                Ok(decoder) => decoder,
                Err(err) => {
                    eprintln!("decoder init failed: {}", err);
                    process::exit(1);
                }
            };

            match decoder.decode(&samples, 16) {
                Ok(messages) if messages.is_empty() => println!("No messages decoded."),
                Ok(messages) => {
                    for m in messages {
                        println!(
                            "{:+7.1} Hz  {:5.1} dB  type {}  {}",
                            m.freq_offset, m.snr, m.frame_type, m.message
                        );
                    }
                }
                Err(err) => {
                    eprintln!("decode failed: {}", err);
                    process::exit(1);
                }
            }
        }
        _ => usage(&args[0]),
    }
}

fn print_tones(tones: &[u8; NN]) {
    print!("Tones:   ");
    for (i, &tone) in tones.iter().enumerate() {
        if i == 7 || i == 36 || i == 43 || i == 72 {
            print!(" ");
        }
        print!("{}", tone);
    }
    println!();
}
