use shadow_rs::ShadowBuilder;

fn main() {
    // Git and build metadata shown by `school-api --version`
    ShadowBuilder::builder()
        .build()
        .expect("Failed to generate build metadata");
}
