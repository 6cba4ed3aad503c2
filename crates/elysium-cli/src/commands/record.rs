use super::Journey;

pub fn run(reason_id: u32, audio_ref: &str) -> Result<(), Box<dyn std::error::Error>> {
    let mut journey = Journey::open()?;
    let next = journey
        .state
        .try_attach_recording(reason_id, audio_ref)
        .into_result()
        .map_err(|reason| reason.to_string())?;
    journey.save(next)?;
    println!("recording attached to reason {reason_id}");
    Ok(())
}
