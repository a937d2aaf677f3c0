use image::RgbaImage;
use log::info;
use sdl2::event::Event;
use sdl2::keyboard::Keycode;
use sdl2::pixels::PixelFormatEnum;

use crate::errors::*;

/// Show a rendered maze in a window until it is closed or `Q` is pressed.
pub fn show_image(title: &str, image: &RgbaImage) -> Result<()> {

    let sdl_context = sdl2::init()?;
    let video_subsystem = sdl_context.video()?;

    let (width, height) = image.dimensions();
    let window = video_subsystem.window(title, width, height)
                                .position_centered()
                                .resizable()
                                .build()
                                .map_err(|e| e.to_string())?;
    let mut canvas = window.into_canvas()
                           .present_vsync()
                           .accelerated()
                           .build()
                           .map_err(|e| e.to_string())?;

    // ABGR8888 is stored as R, G, B, A bytes on little endian machines, the layout of RgbaImage.
    let texture_creator = canvas.texture_creator();
    let mut texture = texture_creator.create_texture_static(PixelFormatEnum::ABGR8888, width, height)
                                     .map_err(|e| e.to_string())?;
    texture.update(None, image.as_raw(), width as usize * 4)
           .map_err(|e| e.to_string())?;

    info!("showing {}x{} maze, press Q or close the window to quit", width, height);

    let mut events = sdl_context.event_pump()?;
    'event: loop {
        for event in events.poll_iter() {
            match event {
                Event::Quit { .. } => break 'event,
                Event::KeyDown { keycode: Some(Keycode::Q), .. } => break 'event,
                _ => continue,
            }
        }

        canvas.clear();
        canvas.copy(&texture, None, None)?;
        canvas.present();
    }

    Ok(())
}
