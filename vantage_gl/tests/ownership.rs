use vantage_gl::driver::HeadlessDriver;
use vantage_gl::{BufferTarget, ContextDesc, ContextId, Gl, GlError, SurfaceId, TextureTarget};

fn session() -> Gl<HeadlessDriver> {
    vantage_utils::init_logging();
    Gl::new(HeadlessDriver::new())
}

fn two_unshared_contexts(gl: &mut Gl<HeadlessDriver>) -> (ContextId, ContextId) {
    let first = gl.create_context(ContextDesc::default()).unwrap();
    let second = gl.create_context(ContextDesc::default()).unwrap();
    (first, second)
}

#[test]
fn texture_from_a_foreign_share_group_is_rejected() {
    let mut gl = session();
    let (first, second) = two_unshared_contexts(&mut gl);

    gl.make_current(first, SurfaceId(1)).unwrap();
    let texture = gl.create_texture().unwrap();

    gl.make_current(second, SurfaceId(2)).unwrap();
    let err = gl.bind_texture(&texture, TextureTarget::D2).unwrap_err();
    assert!(matches!(err, GlError::NotOwned { .. }));

    // Queries are rejected the same way.
    assert!(matches!(
        gl.is_texture_bound(&texture),
        Err(GlError::NotOwned { .. })
    ));

    gl.make_current(first, SurfaceId(1)).unwrap();
    gl.delete_texture(texture).unwrap();
}

#[test]
fn exclusive_objects_are_rejected_even_within_a_share_group() {
    let mut gl = session();
    let first = gl.create_context(ContextDesc::default()).unwrap();
    let second = gl
        .create_context(ContextDesc::builder().share_with(first).build())
        .unwrap();

    gl.make_current(first, SurfaceId(1)).unwrap();
    let vao = gl.create_vertex_array().unwrap();
    let fb = gl.create_framebuffer().unwrap();

    gl.make_current(second, SurfaceId(2)).unwrap();
    assert!(matches!(
        gl.bind_vertex_array(&vao),
        Err(GlError::NotOwned { .. })
    ));
    assert!(matches!(
        gl.bind_framebuffer(&fb),
        Err(GlError::NotOwned { .. })
    ));

    gl.make_current(first, SurfaceId(1)).unwrap();
    gl.bind_vertex_array(&vao).unwrap();
    gl.delete_vertex_array(vao).unwrap();
    gl.delete_framebuffer(fb).unwrap();
}

#[test]
fn deletion_from_a_foreign_context_is_rejected() {
    let mut gl = session();
    let (first, second) = two_unshared_contexts(&mut gl);

    gl.make_current(first, SurfaceId(1)).unwrap();
    let buffer = gl.create_buffer().unwrap();

    gl.make_current(second, SurfaceId(2)).unwrap();
    assert!(matches!(
        gl.delete_buffer(buffer),
        Err(GlError::NotOwned { .. })
    ));
    // The handle is gone either way; the deleting context never saw it.
    assert_eq!(gl.driver().counters().delete_object, 0);
}

#[test]
fn operations_without_a_current_context_are_rejected() {
    let mut gl = session();
    let ctx = gl.create_context(ContextDesc::default()).unwrap();

    gl.make_current(ctx, SurfaceId(1)).unwrap();
    let buffer = gl.create_buffer().unwrap();
    gl.clear_current();

    assert!(matches!(
        gl.create_buffer(),
        Err(GlError::NoCurrentContext)
    ));
    assert!(matches!(
        gl.bind_buffer(&buffer, BufferTarget::Array),
        Err(GlError::NoCurrentContext)
    ));
    assert!(matches!(
        gl.unbind_buffer(BufferTarget::Array),
        Err(GlError::NoCurrentContext)
    ));
    assert!(matches!(
        gl.is_buffer_bound(&buffer, BufferTarget::Array),
        Err(GlError::NoCurrentContext)
    ));
    assert!(matches!(
        gl.is_buffer_target_bound(BufferTarget::Array),
        Err(GlError::NoCurrentContext)
    ));

    gl.make_current(ctx, SurfaceId(1)).unwrap();
    gl.delete_buffer(buffer).unwrap();

    gl.clear_current();
    assert!(matches!(gl.viewport(), Err(GlError::NoCurrentContext)));
    assert!(matches!(
        gl.clear_program(),
        Err(GlError::NoCurrentContext)
    ));
}

#[test]
fn allocation_failure_is_surfaced_as_a_driver_error() {
    use vantage_gl::DriverErrorCode;

    let mut driver = HeadlessDriver::new();
    driver.fail_next_allocation(DriverErrorCode::OutOfMemory);

    let mut gl = Gl::new(driver);
    let ctx = gl.create_context(ContextDesc::default()).unwrap();
    gl.make_current(ctx, SurfaceId(1)).unwrap();

    assert_eq!(
        gl.create_buffer().unwrap_err(),
        GlError::Driver {
            code: DriverErrorCode::OutOfMemory
        }
    );
    // The next allocation works again.
    let buffer = gl.create_buffer().unwrap();
    gl.delete_buffer(buffer).unwrap();
}
